//! Pluggable resize capability.
//!
//! The panel never touches pixels itself. A [`ResizeBackend`] turns the
//! uploaded bytes into a raster of the requested size and encodes that
//! raster for download. [`ImageBackend`] is the default implementation
//! built on the `image` crate.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::types::{Dimensions, OutputFormat, ResampleFilter, ResizeError, ResizeSettings};

/// Resample-and-encode capability behind the resizer panel.
pub trait ResizeBackend {
    /// Intermediate raster passed from [`resize`](Self::resize) to
    /// [`encode`](Self::encode).
    type Raster;

    /// Decode `source` and resample it to exactly `width` x `height`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResizeError`] if the source cannot be decoded or the
    /// target size is empty.
    fn resize(&self, source: &[u8], width: u32, height: u32) -> Result<Self::Raster, ResizeError>;

    /// Encode a resized raster.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::Encode`] if the encoder fails.
    fn encode(
        &self,
        raster: &Self::Raster,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Vec<u8>, ResizeError>;
}

/// Run both backend steps with the call parameters from `settings`.
///
/// # Errors
///
/// Propagates any [`ResizeError`] from the backend.
pub fn resize_and_encode<B: ResizeBackend + ?Sized>(
    backend: &B,
    source: &[u8],
    target: Dimensions,
    settings: &ResizeSettings,
) -> Result<Vec<u8>, ResizeError> {
    let raster = backend.resize(source, target.width, target.height)?;
    let encoded = backend.encode(&raster, settings.format, settings.quality)?;
    tracing::debug!(%target, bytes = encoded.len(), "resize encoded");
    Ok(encoded)
}

/// Read the pixel size from an image header without decoding pixels.
///
/// # Errors
///
/// Returns [`ResizeError::EmptyInput`] for empty input and
/// [`ResizeError::Decode`] if the format is unrecognized.
pub fn probe_dimensions(bytes: &[u8]) -> Result<Dimensions, ResizeError> {
    if bytes.is_empty() {
        return Err(ResizeError::EmptyInput);
    }
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ResizeError::Decode(image::ImageError::IoError(e)))?;
    let (width, height) = reader.into_dimensions().map_err(ResizeError::Decode)?;
    Ok(Dimensions { width, height })
}

/// Default backend: `image` crate decode, resample and encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageBackend {
    filter: ResampleFilter,
}

impl ImageBackend {
    /// Create a backend that resamples with `filter`.
    #[must_use]
    pub const fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    /// The resampling filter in use.
    #[must_use]
    pub const fn filter(&self) -> ResampleFilter {
        self.filter
    }
}

impl ResizeBackend for ImageBackend {
    type Raster = RgbaImage;

    fn resize(&self, source: &[u8], width: u32, height: u32) -> Result<RgbaImage, ResizeError> {
        let target = Dimensions { width, height };
        if target.is_empty() {
            return Err(ResizeError::InvalidDimensions(target));
        }
        if source.is_empty() {
            return Err(ResizeError::EmptyInput);
        }

        let decoded = image::load_from_memory(source).map_err(ResizeError::Decode)?;
        // RGBA keeps the alpha channel through resampling.
        let rgba = decoded.to_rgba8();
        Ok(image::imageops::resize(
            &rgba,
            width,
            height,
            self.filter.to_image_filter(),
        ))
    }

    fn encode(
        &self,
        raster: &RgbaImage,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Vec<u8>, ResizeError> {
        let mut buf = Vec::new();
        match format {
            OutputFormat::Png => {
                let encoder = PngEncoder::new_with_quality(
                    &mut buf,
                    png_compression(quality),
                    PngFilter::Adaptive,
                );
                encoder
                    .write_image(
                        raster.as_raw(),
                        raster.width(),
                        raster.height(),
                        ExtendedColorType::Rgba8,
                    )
                    .map_err(ResizeError::Encode)?;
            }
            OutputFormat::Jpeg => {
                let rgb = image::DynamicImage::ImageRgba8(raster.clone()).to_rgb8();
                let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
                encoder
                    .write_image(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        ExtendedColorType::Rgb8,
                    )
                    .map_err(ResizeError::Encode)?;
            }
        }
        Ok(buf)
    }
}

/// PNG is lossless; quality only trades encode time for file size.
const fn png_compression(quality: u8) -> CompressionType {
    match quality {
        0..=33 => CompressionType::Fast,
        34..=66 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}
