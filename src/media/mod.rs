// SPDX-License-Identifier: MPL-2.0
//! Image decoding, caching and crop rasterization.
//!
//! - [`image`]: encoded bytes to [`ImageData`] (pixels plus an Iced handle)
//! - [`cache`]: url-keyed LRU cache of decoded images
//! - [`crop_raster`]: two-pass crop renderer and JPEG encoder

pub mod cache;
pub mod crop_raster;
pub mod image;

pub use cache::{CacheStats, ImageCache};
pub use crop_raster::{CropError, CropGeometry};
pub use image::{decode, ImageData};
