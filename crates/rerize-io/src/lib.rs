//! rerize-io: Browser I/O and Dioxus component library.
//!
//! Handles file uploads, object URL lifetimes, Blob downloads, and
//! provides the UI components for the re-rize web application.

pub mod blob;
pub mod components;
pub mod download;

pub use blob::{BlobError, BlobUrl};
pub use components::{DimensionControls, DownloadLink, DropZone, ResizerPanel, StatusBanner};
pub use download::DownloadError;
