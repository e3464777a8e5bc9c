//! Transient error banner.

use dioxus::prelude::*;

/// Props for the [`StatusBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StatusBannerProps {
    /// Message to show. Nothing renders when `None`.
    error: Option<String>,
}

/// Shows the current error, if any. There is no dismiss button; the
/// message clears itself.
#[component]
pub fn StatusBanner(props: StatusBannerProps) -> Element {
    rsx! {
        if let Some(ref err) = props.error {
            p { class: "status status--error", role: "alert", "{err}" }
        }
    }
}
