//! File download via an existing object URL.
//!
//! Dioxus has no built-in file download API. This module triggers a
//! download by programmatically clicking a temporary `<a download>`
//! element pointed at a URL the caller already owns. The URL is not
//! revoked here; its [`BlobUrl`](crate::blob::BlobUrl) owner does that.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Errors that can occur when triggering a file download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Start a browser download of `href` saved as `filename`.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if the document is unavailable or
/// element creation fails.
pub fn trigger_download(href: &str, filename: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;

    anchor.set_href(href);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download is already initiated; a failed removal is not a
    // failed download.
    let _ = body.remove_child(&anchor);

    tracing::info!(%filename, "download triggered");
    Ok(())
}
