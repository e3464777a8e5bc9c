//! Drop zone with file picker, image preview and delete button.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdTrash2;

/// Props for the [`DropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropZoneProps {
    /// Object URL of the image to preview, if any.
    preview: Option<String>,
    /// Whether a drag is hovering over the zone.
    dragging: bool,
    /// Called with `(bytes, filename, content type)` after a file was
    /// read. The content type is whatever the browser declared.
    on_file: EventHandler<(Vec<u8>, String, Option<String>)>,
    /// Called when the browser fails to read a file.
    on_read_error: EventHandler<()>,
    /// Called with `true` on drag-over and `false` on drag-leave or drop.
    on_drag: EventHandler<bool>,
    /// Called when the delete button is pressed.
    on_delete: EventHandler<()>,
}

/// CSS class list for the zone.
fn zone_class(dragging: bool, has_preview: bool) -> String {
    let mut class = String::from("drop-zone");
    if dragging {
        class.push_str(" drop-zone--dragging");
    }
    if has_preview {
        class.push_str(" drop-zone--filled");
    }
    class
}

/// A drag-and-drop zone with a file picker.
///
/// Only the first file of a pick or drop is used. The `image/*` accept
/// hint is advisory; any file is forwarded.
#[component]
pub fn DropZone(props: DropZoneProps) -> Element {
    let on_file = props.on_file;
    let on_read_error = props.on_read_error;
    let on_drag = props.on_drag;
    let on_delete = props.on_delete;

    // Shared by the file-picker and drag-and-drop paths.
    let read_first = move |files: Vec<FileData>| async move {
        let Some(file) = files.first() else {
            return;
        };
        let name = file.name();
        let content_type = file.content_type();
        match file.read_bytes().await {
            Ok(bytes) => on_file.call((bytes.to_vec(), name, content_type)),
            Err(e) => {
                tracing::warn!(%name, error = %e, "file read failed");
                on_read_error.call(());
            }
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        read_first(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        on_drag.call(false);
        read_first(evt.files()).await;
    };

    let class = zone_class(props.dragging, props.preview.is_some());

    rsx! {
        div {
            class: "{class}",
            ondragover: move |evt| {
                evt.prevent_default();
                on_drag.call(true);
            },
            ondragleave: move |evt| {
                evt.prevent_default();
                on_drag.call(false);
            },
            ondrop: handle_drop,

            if let Some(ref src) = props.preview {
                div { class: "preview",
                    img { src: "{src}", alt: "Image preview" }
                    button {
                        class: "preview__delete",
                        r#type: "button",
                        title: "Remove image",
                        onclick: move |_| on_delete.call(()),
                        Icon { width: 18, height: 18, icon: LdTrash2 }
                    }
                }
            } else {
                p { class: "drop-zone__hint", "Drop your image here" }
                p { class: "drop-zone__or", "or" }
            }

            label { class: "button button--primary",
                input {
                    r#type: "file",
                    accept: "image/*",
                    class: "hidden",
                    onchange: handle_files,
                }
                "Upload image"
            }
        }
    }
}
