//! Transient status: an auto-expiring error message and a loading flag.
//!
//! An error is a timed state transition. [`Status::report`] stores the
//! message together with a deadline; [`Status::expire`] clears it only
//! once that deadline has passed. Reporting a newer error moves the
//! deadline, so a timer scheduled for an older error that fires in
//! between finds nothing to clear.

use web_time::{Duration, Instant};

/// Error banner and loading indicator state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    error: Option<String>,
    deadline: Option<Instant>,
    display_for: Duration,
    loading: bool,
}

impl Status {
    /// Create an empty status whose errors stay visible for
    /// `display_for`.
    #[must_use]
    pub const fn new(display_for: Duration) -> Self {
        Self {
            error: None,
            deadline: None,
            display_for,
            loading: false,
        }
    }

    /// The error currently shown, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the current error will be cleared.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// How long each error is shown.
    #[must_use]
    pub const fn display_for(&self) -> Duration {
        self.display_for
    }

    /// Whether a resize is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Show `message`, replacing any current error and its deadline.
    ///
    /// Returns the new deadline so the caller can schedule
    /// [`expire`](Self::expire).
    pub fn report(&mut self, message: impl Into<String>, now: Instant) -> Instant {
        let deadline = now + self.display_for;
        self.error = Some(message.into());
        self.deadline = Some(deadline);
        deadline
    }

    /// Clear the error if its deadline is at or before `now`.
    ///
    /// Returns `true` if a message was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.error = None;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new(Duration::from_millis(
            crate::ResizeSettings::DEFAULT_ERROR_DISPLAY_MS,
        ))
    }
}
