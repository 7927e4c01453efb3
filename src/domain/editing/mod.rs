// SPDX-License-Identifier: MPL-2.0
//! Image editing domain types.

pub mod crop;
pub mod newtypes;

pub use crop::{CropDrag, CropTransform, Offset};
pub use newtypes::{AspectRatio, CropScale, RotationDegrees};
