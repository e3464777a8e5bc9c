//! Persistent link to the last resized image.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdDownload;

/// Props for the [`DownloadLink`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DownloadLinkProps {
    /// Object URL of the artifact.
    href: String,
    /// File name offered to the browser.
    filename: String,
}

/// A "Download" link that stays after the automatic download, under the
/// same file name.
#[component]
pub fn DownloadLink(props: DownloadLinkProps) -> Element {
    rsx! {
        a {
            class: "button button--secondary download",
            href: "{props.href}",
            download: "{props.filename}",
            "Download"
            Icon { width: 18, height: 18, icon: LdDownload }
        }
    }
}
