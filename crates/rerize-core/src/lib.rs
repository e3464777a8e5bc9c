//! rerize-core: Resizer panel state and resize backend (sans-IO).
//!
//! Tracks the uploaded image, the requested width/height with an
//! optional aspect-ratio lock, submit validation, transient error
//! status and the resized artifact. Pixel work goes through the
//! [`ResizeBackend`] trait; [`ImageBackend`] implements it with the
//! `image` crate.
//!
//! This crate has **no browser dependencies**. Object URLs, file reads,
//! timers and downloads live in `rerize-io`.

pub mod backend;
pub mod dimensions;
pub mod panel;
pub mod status;
pub mod types;

pub use backend::{ImageBackend, ResizeBackend, probe_dimensions, resize_and_encode};
pub use dimensions::{AspectRatio, DimensionInput, derive_height, derive_width, parse_dimension};
pub use panel::{Artifact, ImageSource, ResizeRequest, Resizer, SubmitOutcome, SubmitTicket};
pub use status::Status;
pub use types::{
    Dimensions, OutputFormat, READ_FAILED_MESSAGE, ResampleFilter, ResizeError, ResizeSettings,
    RgbaImage, SubmitError,
};
