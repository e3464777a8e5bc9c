//! Shared types for the re-rize resizer.

use std::fmt;

use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Re-export `RgbaImage` so downstream crates can hold resized rasters
/// without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create a new pixel size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either axis is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resampling filter used by [`ImageBackend`](crate::ImageBackend).
///
/// Ordered from fastest/lowest-quality to slowest/highest-quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest-neighbor: fastest, blocky artifacts.
    Nearest,
    /// Bilinear interpolation: fast, decent quality.
    Triangle,
    /// Bicubic (Catmull-Rom): moderate speed, good quality.
    CatmullRom,
    /// Gaussian: moderate speed, smooth output.
    Gaussian,
    /// Lanczos with 3 lobes: slowest, sharpest.
    #[default]
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the `image` crate's `FilterType`.
    #[must_use]
    pub const fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Triangle => image::imageops::FilterType::Triangle,
            Self::CatmullRom => image::imageops::FilterType::CatmullRom,
            Self::Gaussian => image::imageops::FilterType::Gaussian,
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("Nearest"),
            Self::Triangle => f.write_str("Triangle"),
            Self::CatmullRom => f.write_str("CatmullRom"),
            Self::Gaussian => f.write_str("Gaussian"),
            Self::Lanczos3 => f.write_str("Lanczos3"),
        }
    }
}

/// Encoded output format of a resize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossless PNG with the alpha channel preserved.
    #[default]
    Png,
    /// Lossy JPEG. The alpha channel is dropped.
    Jpeg,
}

impl OutputFormat {
    /// MIME type used for the Blob wrapping the encoded bytes.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Settings for the resizer panel.
///
/// There is no environment configuration; every field has a
/// compile-time default exposed as a `DEFAULT_*` constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeSettings {
    /// Resampling filter handed to the backend.
    pub filter: ResampleFilter,

    /// Output encoding.
    pub format: OutputFormat,

    /// Encoder quality, 1 to 100. JPEG uses it directly; PNG maps it
    /// to a compression level.
    pub quality: u8,

    /// How long an error message stays visible, in milliseconds.
    pub error_display_ms: u64,

    /// Prefix of the downloaded file name, followed by `{w}x{h}.{ext}`.
    pub filename_prefix: String,
}

impl ResizeSettings {
    /// Default encoder quality.
    pub const DEFAULT_QUALITY: u8 = 90;

    /// Default error display duration in milliseconds.
    pub const DEFAULT_ERROR_DISPLAY_MS: u64 = 3000;

    /// Default download file name prefix.
    pub const DEFAULT_FILENAME_PREFIX: &'static str = "re-rize_xyz_";

    /// Error display duration as a [`Duration`].
    #[must_use]
    pub const fn error_display(&self) -> Duration {
        Duration::from_millis(self.error_display_ms)
    }

    /// File name for an artifact of the given size.
    ///
    /// The automatic download and the persistent download link both
    /// use this name.
    #[must_use]
    pub fn artifact_filename(&self, size: Dimensions) -> String {
        format!(
            "{}{}x{}.{}",
            self.filename_prefix,
            size.width,
            size.height,
            self.format.extension()
        )
    }
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::default(),
            format: OutputFormat::default(),
            quality: Self::DEFAULT_QUALITY,
            error_display_ms: Self::DEFAULT_ERROR_DISPLAY_MS,
            filename_prefix: Self::DEFAULT_FILENAME_PREFIX.to_owned(),
        }
    }
}

/// Errors raised by a [`ResizeBackend`](crate::ResizeBackend).
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    /// The source image bytes were empty.
    #[error("source image data is empty")]
    EmptyInput,

    /// Failed to decode the source image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// Failed to encode the resized raster.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    /// The requested target size has a zero axis.
    #[error("invalid target size {0}")]
    InvalidDimensions(Dimensions),

    /// A browser API failed while producing the artifact.
    #[error("browser API error: {0}")]
    Browser(String),
}

/// Shown when an uploaded file could not be read or previewed.
pub const READ_FAILED_MESSAGE: &str = "Failed to read file";

/// Why a submit did not produce an artifact.
///
/// The `Display` strings are the exact messages shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// No image has been uploaded.
    #[error("Please upload an image")]
    NoImage,

    /// Width or height is not a positive number.
    #[error("Please enter width and height")]
    InvalidDimensions,

    /// The backend failed somewhere in the resize/encode sequence.
    #[error("Error resizing image")]
    Resize(#[source] ResizeError),

    /// A resize is already in flight.
    #[error("A resize is already in progress")]
    Busy,
}

impl SubmitError {
    /// Whether this error is shown in the status banner.
    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        !matches!(self, Self::Busy)
    }
}
