//! State of the resizer panel.
//!
//! [`Resizer`] owns everything the panel shows: the uploaded image, its
//! preview handle, the dragging flag, the requested dimensions, the
//! transient status and the resized artifact. It performs no I/O. The
//! browser layer feeds it events and object URL handles, and runs the
//! resize between [`Resizer::begin_submit`] and
//! [`Resizer::finish_submit`].
//!
//! `U` is the preview/download handle type. Slots hold it behind an
//! `Rc`, so a handle is dropped (and, for browser object URLs,
//! revoked) as soon as the last slot referencing it is superseded or
//! the `Resizer` itself is dropped.

use std::rc::Rc;

use web_time::Instant;

use crate::backend::probe_dimensions;
use crate::dimensions::DimensionInput;
use crate::status::Status;
use crate::types::{Dimensions, READ_FAILED_MESSAGE, ResizeError, ResizeSettings, SubmitError};

/// The uploaded file backing the current preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    name: String,
    bytes: Rc<[u8]>,
    natural: Option<Dimensions>,
}

impl ImageSource {
    /// File name as reported by the browser.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pixel size read from the image header, if the bytes are a
    /// recognizable image.
    #[must_use]
    pub const fn natural(&self) -> Option<Dimensions> {
        self.natural
    }
}

/// A successfully resized and encoded image.
#[derive(Debug)]
pub struct Artifact<U> {
    url: Rc<U>,
    size: Dimensions,
    filename: String,
}

impl<U> Artifact<U> {
    /// Download handle.
    #[must_use]
    pub fn url(&self) -> &U {
        &self.url
    }

    /// Pixel size of the encoded image.
    #[must_use]
    pub const fn size(&self) -> Dimensions {
        self.size
    }

    /// Download file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Identifies one submit so its completion can be matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    id: u64,
    generation: u64,
    target: Dimensions,
}

/// Work handed to the backend by a validated submit.
#[derive(Debug, Clone)]
pub struct ResizeRequest {
    /// Pass back to [`Resizer::finish_submit`].
    pub ticket: SubmitTicket,
    /// Bytes of the uploaded image.
    pub source: Rc<[u8]>,
    /// Exact output size.
    pub target: Dimensions,
}

/// What [`Resizer::finish_submit`] did with a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The artifact is stored; trigger one download under `filename`.
    Completed {
        /// Download file name.
        filename: String,
        /// Pixel size of the artifact.
        size: Dimensions,
    },
    /// The backend failed; an error is showing.
    Failed,
    /// The image was replaced or deleted while resizing; the result was
    /// discarded.
    Stale,
}

/// Resizer panel state.
#[derive(Debug)]
pub struct Resizer<U> {
    settings: ResizeSettings,
    source: Option<ImageSource>,
    preview: Option<Rc<U>>,
    dragging: bool,
    dimensions: DimensionInput,
    status: Status,
    artifact: Option<Artifact<U>>,
    generation: u64,
    submits: u64,
    in_flight: Option<SubmitTicket>,
}

impl<U> Resizer<U> {
    /// Create an empty panel.
    #[must_use]
    pub fn new(settings: ResizeSettings) -> Self {
        let status = Status::new(settings.error_display());
        Self {
            settings,
            source: None,
            preview: None,
            dragging: false,
            dimensions: DimensionInput::default(),
            status,
            artifact: None,
            generation: 0,
            submits: 0,
            in_flight: None,
        }
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &ResizeSettings {
        &self.settings
    }

    /// The uploaded image, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&ImageSource> {
        self.source.as_ref()
    }

    /// Handle for the image currently previewed: the upload, or the
    /// artifact after a successful resize.
    #[must_use]
    pub fn preview(&self) -> Option<&U> {
        self.preview.as_deref()
    }

    /// Whether a drag is hovering over the drop zone.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Requested output size.
    #[must_use]
    pub const fn dimensions(&self) -> &DimensionInput {
        &self.dimensions
    }

    /// Error and loading state.
    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// The last resize result, if any.
    #[must_use]
    pub const fn artifact(&self) -> Option<&Artifact<U>> {
        self.artifact.as_ref()
    }

    /// A drag entered or moved over the drop zone.
    pub const fn drag_over(&mut self) {
        self.dragging = true;
    }

    /// A drag left the drop zone.
    pub const fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Take a newly picked or dropped file as the only image source.
    ///
    /// The file type is not validated. If the header can be read, width
    /// and height are reset to the image's natural size; otherwise they
    /// keep their previous values. Any previous source, preview and
    /// artifact are dropped.
    pub fn accept_upload(&mut self, name: impl Into<String>, bytes: Vec<u8>, preview: U) {
        let name = name.into();
        let natural = match probe_dimensions(&bytes) {
            Ok(size) => Some(size),
            Err(e) => {
                tracing::warn!(%name, error = %e, "could not read image size");
                None
            }
        };
        tracing::info!(%name, bytes = bytes.len(), ?natural, "image uploaded");

        self.generation += 1;
        self.dragging = false;
        self.source = Some(ImageSource {
            name,
            bytes: bytes.into(),
            natural,
        });
        self.preview = Some(Rc::new(preview));
        self.artifact = None;
        if let Some(size) = natural {
            self.dimensions.initialize(size);
        }
    }

    /// Remove the current image and its preview.
    pub fn delete_image(&mut self) {
        self.generation += 1;
        self.source = None;
        self.preview = None;
        self.dragging = false;
    }

    /// Width input changed.
    pub fn set_width(&mut self, width: f64) {
        self.dimensions.set_width(width);
    }

    /// Height input changed.
    pub fn set_height(&mut self, height: f64) {
        self.dimensions.set_height(height);
    }

    /// Lock checkbox toggled.
    pub fn toggle_lock(&mut self) {
        self.dimensions.toggle_lock();
    }

    /// Show an error that did not come from a submit, such as a failed
    /// file read.
    ///
    /// Returns the deadline at which [`expire_error`](Self::expire_error)
    /// will clear it.
    pub fn report_error(&mut self, message: impl Into<String>, now: Instant) -> Instant {
        self.status.report(message, now)
    }

    /// Show the fixed message for an upload the browser could not read
    /// or preview.
    pub fn report_read_failure(&mut self, now: Instant) -> Instant {
        self.report_error(READ_FAILED_MESSAGE, now)
    }

    /// Clear the error if its display time is over.
    pub fn expire_error(&mut self, now: Instant) -> bool {
        self.status.expire(now)
    }

    /// Validate a submit and, if it may proceed, enter the loading state.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Busy`] if a resize is already running; nothing
    ///   changes.
    /// - [`SubmitError::NoImage`] or [`SubmitError::InvalidDimensions`]
    ///   after reporting the message with its display deadline.
    pub fn begin_submit(&mut self, now: Instant) -> Result<ResizeRequest, SubmitError> {
        if self.in_flight.is_some() {
            return Err(SubmitError::Busy);
        }

        let checked = match (&self.source, self.dimensions.target()) {
            (None, _) => Err(SubmitError::NoImage),
            (Some(_), None) => Err(SubmitError::InvalidDimensions),
            (Some(source), Some(target)) => Ok((Rc::clone(&source.bytes), target)),
        };

        match checked {
            Ok((source, target)) => {
                self.submits += 1;
                let ticket = SubmitTicket {
                    id: self.submits,
                    generation: self.generation,
                    target,
                };
                self.in_flight = Some(ticket);
                self.status.set_loading(true);
                tracing::info!(%target, "resize started");
                Ok(ResizeRequest {
                    ticket,
                    source,
                    target,
                })
            }
            Err(e) => {
                self.status.report(e.to_string(), now);
                Err(e)
            }
        }
    }

    /// Apply the result of the resize started by `ticket`.
    ///
    /// `outcome` carries the download handle for the encoded bytes. The
    /// loading flag is cleared here on every path.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<U, ResizeError>,
        now: Instant,
    ) -> SubmitOutcome {
        if self.in_flight != Some(ticket) {
            tracing::debug!("ignoring completion for an unknown submit");
            return SubmitOutcome::Stale;
        }
        self.in_flight = None;
        self.status.set_loading(false);

        if ticket.generation != self.generation {
            tracing::info!("image changed during resize, result discarded");
            return SubmitOutcome::Stale;
        }

        match outcome {
            Ok(url) => {
                let size = ticket.target;
                let filename = self.settings.artifact_filename(size);
                let url = Rc::new(url);
                self.source = None;
                self.preview = Some(Rc::clone(&url));
                self.artifact = Some(Artifact {
                    url,
                    size,
                    filename: filename.clone(),
                });
                tracing::info!(%size, %filename, "resize finished");
                SubmitOutcome::Completed { filename, size }
            }
            Err(e) => {
                tracing::error!(error = %e, "resize failed");
                self.status.report(SubmitError::Resize(e).to_string(), now);
                SubmitOutcome::Failed
            }
        }
    }
}

impl<U> Default for Resizer<U> {
    fn default() -> Self {
        Self::new(ResizeSettings::default())
    }
}
