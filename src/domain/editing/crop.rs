// SPDX-License-Identifier: MPL-2.0
//! Crop transform value object.
//!
//! A [`CropTransform`] folds the operator's drag, zoom and rotation input into
//! a single affine description. It is created fresh for every crop session and
//! never persisted; only the rasterized output survives the session.

use super::newtypes::{rotation_bounds, CropScale, RotationDegrees};

/// Translation in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Offset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Scale, rotation and translation applied to the source image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropTransform {
    scale: CropScale,
    rotation: RotationDegrees,
    translation: Offset,
}

impl CropTransform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scale(&self) -> CropScale {
        self.scale
    }

    #[must_use]
    pub fn rotation(&self) -> RotationDegrees {
        self.rotation
    }

    #[must_use]
    pub fn translation(&self) -> Offset {
        self.translation
    }

    /// Sets the scale, clamped into `[0.1, 3.0]`.
    pub fn set_scale(&mut self, value: f32) {
        self.scale = CropScale::new(value);
    }

    pub fn zoom_in(&mut self) {
        self.scale = self.scale.step_up();
    }

    pub fn zoom_out(&mut self) {
        self.scale = self.scale.step_down();
    }

    /// Rotates by a quarter turn; positive is clockwise.
    pub fn rotate_clockwise(&mut self) {
        self.rotation = self.rotation.rotated_by(rotation_bounds::QUARTER_TURN);
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.rotation = self.rotation.rotated_by(-rotation_bounds::QUARTER_TURN);
    }

    /// Slider input.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = RotationDegrees::from_slider(degrees);
    }

    pub fn set_translation(&mut self, translation: Offset) {
        self.translation = translation;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// In-flight pointer drag over the crop viewport.
///
/// Translation is recomputed from the drag origin on every move, never
/// accumulated per event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropDrag {
    start_pointer: Offset,
    start_translation: Offset,
}

impl CropDrag {
    #[must_use]
    pub fn begin(pointer: Offset, transform: &CropTransform) -> Self {
        Self {
            start_pointer: pointer,
            start_translation: transform.translation(),
        }
    }

    /// Applies the current pointer position to `transform`.
    pub fn update(&self, pointer: Offset, transform: &mut CropTransform) {
        transform.set_translation(self.start_translation + (pointer - self.start_pointer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transform_is_identity() {
        let transform = CropTransform::new();
        assert!(transform.is_identity());
        assert_eq!(transform.scale().value(), 1.0);
        assert_eq!(transform.rotation().value(), 0.0);
        assert_eq!(transform.translation(), Offset::ZERO);
    }

    #[test]
    fn set_scale_clamps() {
        let mut transform = CropTransform::new();
        transform.set_scale(5.0);
        assert_eq!(transform.scale().value(), 3.0);
        transform.set_scale(-1.0);
        assert!((transform.scale().value() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn drag_is_relative_to_drag_start() {
        let mut transform = CropTransform::new();
        transform.set_translation(Offset::new(10.0, 5.0));

        let drag = CropDrag::begin(Offset::new(100.0, 100.0), &transform);
        drag.update(Offset::new(110.0, 90.0), &mut transform);
        assert_eq!(transform.translation(), Offset::new(20.0, -5.0));

        // A later move replaces the previous one instead of accumulating.
        drag.update(Offset::new(101.0, 101.0), &mut transform);
        assert_eq!(transform.translation(), Offset::new(11.0, 6.0));
    }

    #[test]
    fn reset_after_any_mutation_restores_identity() {
        let mut transform = CropTransform::new();
        transform.zoom_in();
        transform.zoom_in();
        transform.rotate_clockwise();
        transform.rotate_clockwise();
        transform.rotate_clockwise();
        transform.set_rotation(-33.0);
        let drag = CropDrag::begin(Offset::ZERO, &transform);
        drag.update(Offset::new(-40.0, 12.5), &mut transform);
        assert!(!transform.is_identity());

        transform.reset();
        assert!(transform.is_identity());
    }

    #[test]
    fn stepper_rotation_never_leaves_slider_range() {
        let mut transform = CropTransform::new();
        for _ in 0..7 {
            transform.rotate_counter_clockwise();
            let degrees = transform.rotation().value();
            assert!((-180.0..=180.0).contains(&degrees));
        }
        // 7 * -90 = -630 ≡ 90
        assert_eq!(transform.rotation().value(), 90.0);
    }
}
