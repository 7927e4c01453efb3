// SPDX-License-Identifier: MPL-2.0
//! Editing newtypes.
//!
//! This module provides type-safe wrappers for crop values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Crop Scale Bounds
// =============================================================================

/// Crop scale bounds (0.1x to 3.0x).
pub mod scale_bounds {
    /// Minimum scale factor.
    pub const MIN: f32 = 0.1;
    /// Maximum scale factor.
    pub const MAX: f32 = 3.0;
    /// Default scale factor (natural size).
    pub const DEFAULT: f32 = 1.0;
    /// Stepper increment.
    pub const STEP: f32 = 0.1;
}

// =============================================================================
// CropScale
// =============================================================================

/// Scale factor applied to the source image, guaranteed to be within 0.1–3.0.
///
/// # Example
///
/// ```
/// use boutique_showcase::domain::editing::CropScale;
///
/// assert_eq!(CropScale::new(5.0).value(), 3.0);
/// assert_eq!(CropScale::new(-1.0).value(), 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropScale(f32);

impl CropScale {
    /// Creates a new scale, clamping the value to the valid range.
    /// Non-finite input falls back to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(scale_bounds::MIN, scale_bounds::MAX))
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// One stepper press up: exactly one step, then clamped.
    #[must_use]
    pub fn step_up(self) -> Self {
        Self::new(self.0 + scale_bounds::STEP)
    }

    /// One stepper press down: exactly one step, then clamped.
    #[must_use]
    pub fn step_down(self) -> Self {
        Self::new(self.0 - scale_bounds::STEP)
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= scale_bounds::MIN
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= scale_bounds::MAX
    }
}

impl Default for CropScale {
    fn default() -> Self {
        Self(scale_bounds::DEFAULT)
    }
}

// =============================================================================
// Rotation
// =============================================================================

/// Rotation bounds for the continuous slider.
pub mod rotation_bounds {
    pub const MIN: f32 = -180.0;
    pub const MAX: f32 = 180.0;
    /// Discrete stepper increment.
    pub const QUARTER_TURN: f32 = 90.0;
}

/// Rotation in degrees within `[-180, 180]`.
///
/// Arithmetic wraps modulo 360 into `(-180, 180]`, so the ±90° stepper and
/// the slider always describe the same angle. The slider's left end is the
/// one value kept at -180, so the thumb stays where it was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationDegrees(f32);

impl RotationDegrees {
    #[must_use]
    pub fn new(degrees: f32) -> Self {
        Self(normalize_degrees(degrees))
    }

    /// Value set from the slider, clamped to the slider range.
    #[must_use]
    pub fn from_slider(degrees: f32) -> Self {
        if degrees.is_finite() && degrees <= rotation_bounds::MIN {
            return Self(rotation_bounds::MIN);
        }
        Self::new(degrees.clamp(rotation_bounds::MIN, rotation_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    #[must_use]
    pub fn rotated_by(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }

    #[must_use]
    pub fn as_radians(self) -> f32 {
        self.0.to_radians()
    }
}

fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees % 360.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

// =============================================================================
// AspectRatio
// =============================================================================

/// Target crop aspect ratio (width:height), both components non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl AspectRatio {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// width / height
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Pixel height matching `width`, truncated, never below 1.
    #[must_use]
    pub fn height_for_width(self, width: u32) -> u32 {
        let height = u64::from(width) * u64::from(self.height) / u64::from(self.width);
        u32::try_from(height).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self {
            width: 3,
            height: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_clamped() {
        assert_eq!(CropScale::new(5.0).value(), scale_bounds::MAX);
        assert_eq!(CropScale::new(-1.0).value(), scale_bounds::MIN);
        assert_eq!(CropScale::new(1.5).value(), 1.5);
        assert_eq!(CropScale::new(f32::NAN), CropScale::default());
    }

    #[test]
    fn scale_steps_move_by_one_step_and_stay_in_bounds() {
        let mut scale = CropScale::default();
        for _ in 0..3 {
            scale = scale.step_up();
        }
        assert!((scale.value() - 1.3).abs() < 1e-5);

        let off_grid = CropScale::new(1.25);
        assert!((off_grid.step_up().value() - 1.35).abs() < 1e-5);
        assert!((off_grid.step_down().value() - 1.15).abs() < 1e-5);

        let mut scale = CropScale::new(0.15);
        scale = scale.step_down();
        assert_eq!(scale.value(), scale_bounds::MIN);

        let mut scale = CropScale::new(2.95);
        scale = scale.step_up();
        assert!(scale.is_max());

        let mut scale = CropScale::new(0.1);
        scale = scale.step_down();
        assert!(scale.is_min());
        assert_eq!(scale.value(), scale_bounds::MIN);
    }

    #[test]
    fn rotation_wraps_into_half_open_range() {
        assert_eq!(RotationDegrees::new(270.0).value(), -90.0);
        assert_eq!(RotationDegrees::new(-180.0).value(), 180.0);
        assert_eq!(RotationDegrees::new(180.0).value(), 180.0);
        assert_eq!(RotationDegrees::new(540.0).value(), 180.0);
        assert_eq!(RotationDegrees::new(-270.0).value(), 90.0);
        assert_eq!(RotationDegrees::new(f32::INFINITY).value(), 0.0);
    }

    #[test]
    fn quarter_turn_stepper_cycles() {
        let mut rotation = RotationDegrees::default();
        for _ in 0..4 {
            rotation = rotation.rotated_by(rotation_bounds::QUARTER_TURN);
            assert!(rotation.value() > -180.0 && rotation.value() <= 180.0);
        }
        assert_eq!(rotation.value(), 0.0);
    }

    #[test]
    fn slider_input_is_clamped() {
        assert_eq!(RotationDegrees::from_slider(400.0).value(), 180.0);
        assert_eq!(RotationDegrees::from_slider(-45.0).value(), -45.0);
        assert_eq!(RotationDegrees::from_slider(f32::NAN).value(), 0.0);
    }

    #[test]
    fn slider_left_end_stays_at_minus_180() {
        let left = RotationDegrees::from_slider(-180.0);
        assert_eq!(left.value(), -180.0);
        assert_eq!(RotationDegrees::from_slider(-400.0).value(), -180.0);
        assert_eq!(left.rotated_by(rotation_bounds::QUARTER_TURN).value(), -90.0);
        assert_eq!(left.rotated_by(0.0).value(), 180.0);
        assert!((left.as_radians().abs() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn aspect_ratio_heights() {
        let ratio = AspectRatio::default();
        assert_eq!(ratio.height_for_width(400), 533);
        assert!(AspectRatio::new(0, 4).is_none());
        assert_eq!(AspectRatio::new(1, 1).map(|r| r.height_for_width(7)), Some(7));
    }
}
