//! Object URLs for in-memory image bytes.
//!
//! A [`BlobUrl`] wraps the string returned by `URL.createObjectURL` and
//! revokes it when dropped. State slots own their URLs, so replacing a
//! preview or tearing down the panel releases the Blob.

use rerize_core::ResizeError;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// MIME type used when the upload is not a recognizable image.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Errors that can occur while creating a Blob URL.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for BlobError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<BlobError> for ResizeError {
    fn from(err: BlobError) -> Self {
        Self::Browser(err.to_string())
    }
}

/// An object URL that is revoked on drop.
#[derive(Debug, PartialEq, Eq)]
pub struct BlobUrl(String);

impl BlobUrl {
    /// Wrap `bytes` in a `Blob` of `mime_type` and create an object URL
    /// for it.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::JsError`] if Blob or URL creation fails.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, BlobError> {
        let uint8_array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&uint8_array);

        let opts = BlobPropertyBag::new();
        opts.set_type(mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)?;
        Ok(Self(url))
    }

    /// The `blob:` URL, for `src` and `href` attributes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for BlobUrl {
    fn drop(&mut self) {
        // Best-effort: the URL may already be gone with the document.
        let _ = web_sys::Url::revoke_object_url(&self.0);
    }
}

/// MIME type for previewing uploaded bytes.
///
/// The browser's declared type wins when it has one, so formats the
/// `image` crate does not know (SVG, AVIF) still preview. Otherwise the
/// type is sniffed from the content.
#[must_use]
pub fn preview_mime_type<'a>(declared: Option<&'a str>, bytes: &[u8]) -> &'a str {
    match declared.map(str::trim) {
        Some(declared) if !declared.is_empty() => declared,
        _ => image::guess_format(bytes).map_or(FALLBACK_MIME, |format| format.to_mime_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_png() {
        let header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(preview_mime_type(None, &header), "image/png");
    }

    #[test]
    fn sniffs_jpeg() {
        assert_eq!(
            preview_mime_type(None, &[0xFF, 0xD8, 0xFF, 0xE0]),
            "image/jpeg"
        );
    }

    #[test]
    fn unknown_bytes_fall_back() {
        assert_eq!(preview_mime_type(None, b"hello"), FALLBACK_MIME);
        assert_eq!(preview_mime_type(None, &[]), FALLBACK_MIME);
    }

    #[test]
    fn declared_type_wins_over_sniffing() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;
        assert_eq!(preview_mime_type(Some("image/svg+xml"), svg), "image/svg+xml");
        assert_eq!(preview_mime_type(Some("image/avif"), b"...."), "image/avif");
    }

    #[test]
    fn blank_declared_type_is_sniffed() {
        assert_eq!(preview_mime_type(Some(""), &[0xFF, 0xD8, 0xFF]), "image/jpeg");
        assert_eq!(preview_mime_type(Some("  "), b"hello"), FALLBACK_MIME);
    }
}
