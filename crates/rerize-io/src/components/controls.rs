//! Width/height inputs, aspect lock toggle and submit button.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdLock;
use rerize_core::parse_dimension;

/// Props for the [`DimensionControls`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DimensionControlsProps {
    /// Current width.
    width: f64,
    /// Current height.
    height: f64,
    /// Whether the aspect ratio is locked.
    locked: bool,
    /// Nothing has set the dimensions yet. Shows empty fields.
    blank: bool,
    /// Whether a resize is in flight. Disables the submit button.
    loading: bool,
    /// Fired with the parsed width on every edit.
    on_width: EventHandler<f64>,
    /// Fired with the parsed height on every edit.
    on_height: EventHandler<f64>,
    /// Fired when the lock checkbox changes.
    on_toggle_lock: EventHandler<()>,
    /// Fired when the form is submitted.
    on_submit: EventHandler<()>,
}

/// Render a dimension for a number input.
///
/// Before any value is set the field stays empty so the placeholder is
/// visible. Derived values are rounded to two decimals.
fn format_dimension(value: f64, blank: bool) -> String {
    if blank || !value.is_finite() {
        return String::new();
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}

/// The dimension form.
#[component]
pub fn DimensionControls(props: DimensionControlsProps) -> Element {
    let on_width = props.on_width;
    let on_height = props.on_height;
    let on_toggle_lock = props.on_toggle_lock;
    let on_submit = props.on_submit;

    let width = format_dimension(props.width, props.blank);
    let height = format_dimension(props.height, props.blank);
    let lock_class = if props.locked {
        "lock lock--on"
    } else {
        "lock"
    };

    rsx! {
        form {
            class: "controls",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },

            input {
                id: "width",
                r#type: "number",
                inputmode: "numeric",
                name: "width",
                placeholder: "Width",
                value: "{width}",
                oninput: move |e| on_width.call(parse_dimension(&e.value())),
            }

            label { class: "{lock_class}", title: "Lock aspect ratio",
                input {
                    r#type: "checkbox",
                    class: "hidden",
                    checked: props.locked,
                    onchange: move |_| on_toggle_lock.call(()),
                }
                Icon { width: 18, height: 18, icon: LdLock }
            }

            input {
                id: "height",
                r#type: "number",
                inputmode: "numeric",
                name: "height",
                placeholder: "Height",
                value: "{height}",
                oninput: move |e| on_height.call(parse_dimension(&e.value())),
            }

            button {
                id: "submit",
                r#type: "submit",
                class: "button button--primary",
                disabled: props.loading,
                if props.loading { "Loading..." } else { "Generate" }
            }
        }
    }
}
