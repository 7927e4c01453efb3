// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Carousel**: Swipe threshold and slide animation
//! - **Lazy loading**: Visibility threshold, fade-in and decode cache
//! - **Cropper**: Aspect ratio, reference viewport, scale bounds and encoding
//! - **Inquiry**: Messaging deep link defaults
//! - **Invitations**: Admin invitation lifetime

// ==========================================================================
// Carousel Defaults
// ==========================================================================

/// Horizontal swipe distance (logical px) that must be exceeded to navigate.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Duration of the slide animation between carousel items.
pub const DEFAULT_SLIDE_DURATION_MS: u64 = 300;

/// Upper bound for the slide animation, so a misconfigured file cannot freeze the strip.
pub const MAX_SLIDE_DURATION_MS: u64 = 2_000;

// ==========================================================================
// Lazy Loading Defaults
// ==========================================================================

/// Fraction of an element's area that must be visible before its image loads.
pub const DEFAULT_LAZY_VISIBILITY_THRESHOLD: f32 = 0.1;

/// Duration of the fade-in once an image finished loading.
pub const DEFAULT_FADE_DURATION_MS: u64 = 300;

/// Number of decoded images kept in memory.
pub const DEFAULT_IMAGE_CACHE_ENTRIES: usize = 64;

/// Minimum decoded image cache size.
pub const MIN_IMAGE_CACHE_ENTRIES: usize = 4;

/// Placeholder reference shown when an image cannot be loaded.
pub const DEFAULT_PLACEHOLDER_URL: &str = "builtin:placeholder";

// ==========================================================================
// Cropper Defaults
// ==========================================================================

/// Default crop aspect ratio width component (3:4 portrait).
pub const DEFAULT_ASPECT_WIDTH: u32 = 3;

/// Default crop aspect ratio height component.
pub const DEFAULT_ASPECT_HEIGHT: u32 = 4;

/// Width of the crop preview viewport in logical pixels.
pub const DEFAULT_REFERENCE_WIDTH: u32 = 400;

/// JPEG quality used when encoding the cropped artifact.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Minimum crop scale factor.
pub const MIN_CROP_SCALE: f32 = 0.1;

/// Maximum crop scale factor.
pub const MAX_CROP_SCALE: f32 = 3.0;

/// Scale change per stepper press.
pub const CROP_SCALE_STEP: f32 = 0.1;

/// Rotation change per stepper press, in degrees.
pub const CROP_ROTATION_STEP_DEGREES: f32 = 90.0;

// ==========================================================================
// Inquiry Defaults
// ==========================================================================

/// Messaging number receiving customer inquiries (international format, digits only).
pub const DEFAULT_INQUIRY_PHONE: &str = "919881207898";

/// Product noun used in the prefilled inquiry message.
pub const DEFAULT_PRODUCT_NOUN: &str = "ghagra choli";

/// Currency symbol prefixed to prices.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

// ==========================================================================
// Invitation Defaults
// ==========================================================================

/// Number of days an admin invitation stays valid.
pub const DEFAULT_INVITATION_VALIDITY_DAYS: u32 = 7;

/// Base URL used when building invitation signup links.
pub const DEFAULT_SIGNUP_BASE_URL: &str = "https://boutique.local";

/// Maximum images attached to one collection.
pub const MAX_IMAGES_PER_COLLECTION: usize = 5;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SWIPE_THRESHOLD_PX > 0.0);
    assert!(DEFAULT_SLIDE_DURATION_MS <= MAX_SLIDE_DURATION_MS);

    assert!(DEFAULT_LAZY_VISIBILITY_THRESHOLD > 0.0);
    assert!(DEFAULT_LAZY_VISIBILITY_THRESHOLD <= 1.0);
    assert!(DEFAULT_IMAGE_CACHE_ENTRIES >= MIN_IMAGE_CACHE_ENTRIES);

    assert!(DEFAULT_ASPECT_WIDTH > 0);
    assert!(DEFAULT_ASPECT_HEIGHT > 0);
    assert!(DEFAULT_REFERENCE_WIDTH > 0);
    assert!(DEFAULT_JPEG_QUALITY > 0 && DEFAULT_JPEG_QUALITY <= 100);

    assert!(MIN_CROP_SCALE > 0.0);
    assert!(MAX_CROP_SCALE > MIN_CROP_SCALE);
    assert!(CROP_SCALE_STEP > 0.0);

    assert!(DEFAULT_INVITATION_VALIDITY_DAYS > 0);
    assert!(MAX_IMAGES_PER_COLLECTION > 0);
};
