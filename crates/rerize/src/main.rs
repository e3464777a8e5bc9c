use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use rerize_io::ResizerPanel;

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        web_sys::console::warn_1(&format!("logger already initialized: {e}").into());
    }
    dioxus::launch(app);
}

/// Root application component.
///
/// Everything interactive lives in [`ResizerPanel`]; this only adds the
/// stylesheet and page chrome.
fn app() -> Element {
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "page",
            header { class: "page__header",
                h1 { class: "title", "re-rize" }
                p { class: "subtitle", "Resize an image in your browser and download it as PNG" }
            }

            main { class: "page__main",
                ResizerPanel {}
            }
        }
    }
}
