//! Dioxus UI components for re-rize.
//!
//! Provides the drop zone with preview, the dimension form, the error
//! banner, the persistent download link, and the [`ResizerPanel`] that
//! wires them to the resizer state.

mod controls;
mod download_link;
mod panel;
mod status;
mod upload;

pub use controls::DimensionControls;
pub use download_link::DownloadLink;
pub use panel::ResizerPanel;
pub use status::StatusBanner;
pub use upload::DropZone;
