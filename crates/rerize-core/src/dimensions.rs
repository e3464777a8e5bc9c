//! Width/height bookkeeping with an optional aspect-ratio lock.
//!
//! The user edits width and height as free-form numbers. While the lock
//! is on, editing one axis derives the other from the ratio captured
//! when the lock was switched on (or when a new image arrived while
//! locked). A lock switched on before both axes were positive captures
//! its ratio on the first edit that makes them so. Derivation is a direct call from the edit handlers, so there
//! is no ordering dependency on when derived state gets recomputed.

use crate::types::Dimensions;

/// A finite, positive width/height quotient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Ratio of `width / height`.
    ///
    /// Returns `None` unless both values are finite and positive.
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Option<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Self(width / height))
    }

    /// The raw quotient.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Height that keeps `ratio` for the given width.
#[must_use]
pub fn derive_height(width: f64, ratio: AspectRatio) -> f64 {
    width / ratio.0
}

/// Width that keeps `ratio` for the given height.
#[must_use]
pub fn derive_width(height: f64, ratio: AspectRatio) -> f64 {
    height * ratio.0
}

/// Parse the contents of a number input.
///
/// Empty or non-numeric input counts as zero, which later fails
/// submit validation.
#[must_use]
pub fn parse_dimension(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Requested output size as edited by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionInput {
    width: f64,
    height: f64,
    locked: bool,
    ratio: Option<AspectRatio>,
    edited: bool,
}

impl DimensionInput {
    /// Current width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Current height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Whether the aspect ratio is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// The captured ratio. Only set while locked.
    #[must_use]
    pub const fn ratio(&self) -> Option<AspectRatio> {
        self.ratio
    }

    /// True until an image sets the axes or the user edits one.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        !self.edited
    }

    /// Reset both axes to the natural size of a newly uploaded image.
    pub fn initialize(&mut self, natural: Dimensions) {
        self.width = f64::from(natural.width);
        self.height = f64::from(natural.height);
        self.edited = true;
        self.recapture();
    }

    /// Set the width, deriving the height while locked.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.edited = true;
        match (self.locked, self.ratio) {
            (true, Some(ratio)) => self.height = derive_height(width, ratio),
            // Locked before both axes were usable; capture on this edit.
            (true, None) => self.recapture(),
            (false, _) => {}
        }
    }

    /// Set the height, deriving the width while locked.
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.edited = true;
        match (self.locked, self.ratio) {
            (true, Some(ratio)) => self.width = derive_width(height, ratio),
            // Locked before both axes were usable; capture on this edit.
            (true, None) => self.recapture(),
            (false, _) => {}
        }
    }

    /// Switch the lock on or off.
    ///
    /// Switching on captures the ratio of the current values, which may
    /// differ from the image's own ratio if either axis was edited.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        self.recapture();
    }

    /// Flip the lock.
    pub fn toggle_lock(&mut self) {
        self.set_locked(!self.locked);
    }

    /// Pixel size to render, or `None` if either axis rounds below one
    /// pixel.
    #[must_use]
    pub fn target(&self) -> Option<Dimensions> {
        let width = to_pixels(self.width)?;
        let height = to_pixels(self.height)?;
        Some(Dimensions { width, height })
    }

    fn recapture(&mut self) {
        self.ratio = if self.locked {
            AspectRatio::from_size(self.width, self.height)
        } else {
            None
        };
    }
}

/// Round a user-entered length to whole pixels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(value: f64) -> Option<u32> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let rounded = value.round();
    if rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn input(width: u32, height: u32, locked: bool) -> DimensionInput {
        let mut dims = DimensionInput::default();
        dims.initialize(Dimensions::new(width, height));
        dims.set_locked(locked);
        dims
    }

    #[test]
    fn locked_width_edit_derives_height() {
        let mut dims = input(200, 100, true);
        dims.set_width(400.0);
        assert_eq!(dims.height(), 200.0);
    }

    #[test]
    fn locked_height_edit_derives_width() {
        let mut dims = input(200, 100, true);
        dims.set_width(400.0);
        dims.set_height(50.0);
        assert_eq!(dims.width(), 100.0);
    }

    #[test]
    fn unlocked_edits_are_independent() {
        let mut dims = input(200, 100, false);
        dims.set_width(640.0);
        assert_eq!(dims.height(), 100.0);
        dims.set_height(7.0);
        assert_eq!(dims.width(), 640.0);
        assert!(dims.ratio().is_none());
    }

    #[test]
    fn lock_captures_current_values_not_original() {
        let mut dims = input(200, 100, false);
        dims.set_height(200.0);
        dims.set_locked(true);
        assert_eq!(dims.ratio().unwrap().get(), 1.0);
        dims.set_width(30.0);
        assert_eq!(dims.height(), 30.0);
    }

    #[test]
    fn new_image_recaptures_ratio_while_locked() {
        let mut dims = input(200, 100, true);
        dims.initialize(Dimensions::new(100, 400));
        assert_eq!(dims.ratio().unwrap().get(), 0.25);
        dims.set_height(40.0);
        assert_eq!(dims.width(), 10.0);
    }

    #[test]
    fn zero_height_has_no_ratio() {
        let mut dims = DimensionInput::default();
        dims.set_width(10.0);
        dims.set_locked(true);
        assert!(dims.ratio().is_none());
        dims.set_width(20.0);
        assert_eq!(dims.height(), 0.0);
        assert!(dims.ratio().is_none());
    }

    #[test]
    fn lock_engages_once_both_axes_are_set() {
        let mut dims = DimensionInput::default();
        dims.set_locked(true);
        dims.set_width(200.0);
        dims.set_height(100.0);
        assert_eq!(dims.ratio().unwrap().get(), 2.0);

        dims.set_width(400.0);
        assert_eq!(dims.height(), 200.0);
        dims.set_height(50.0);
        assert_eq!(dims.width(), 100.0);
    }

    #[test]
    fn cleared_height_recaptures_on_next_edit() {
        let mut dims = DimensionInput::default();
        dims.set_width(300.0);
        dims.set_locked(true);
        dims.set_height(150.0);
        dims.set_width(30.0);
        assert_eq!(dims.height(), 15.0);
    }

    #[test]
    fn blank_until_first_value() {
        let mut dims = DimensionInput::default();
        assert!(dims.is_blank());
        dims.toggle_lock();
        assert!(dims.is_blank());
        dims.set_height(0.0);
        assert!(!dims.is_blank());
        assert!(!input(4, 3, false).is_blank());
    }

    #[test]
    fn unlocking_forgets_ratio() {
        let mut dims = input(200, 100, true);
        dims.toggle_lock();
        assert!(!dims.is_locked());
        assert!(dims.ratio().is_none());
    }

    #[test]
    fn fractional_sizes_round_to_pixels() {
        let mut dims = input(3, 2, true);
        dims.set_width(100.0);
        assert_eq!(dims.target(), Some(Dimensions::new(100, 67)));
    }

    #[test]
    fn sub_pixel_target_is_rejected() {
        let mut dims = input(10, 10, false);
        dims.set_width(0.4);
        assert_eq!(dims.target(), None);
        dims.set_width(-5.0);
        assert_eq!(dims.target(), None);
    }

    #[test]
    fn parse_dimension_falls_back_to_zero() {
        assert_eq!(parse_dimension("300"), 300.0);
        assert_eq!(parse_dimension(" 12.5 "), 12.5);
        assert_eq!(parse_dimension(""), 0.0);
        assert_eq!(parse_dimension("abc"), 0.0);
        assert_eq!(parse_dimension("inf"), 0.0);
    }
}
