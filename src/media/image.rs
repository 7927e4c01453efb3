// SPDX-License-Identifier: MPL-2.0
//! Image decoding from encoded bytes (PNG, JPEG, GIF, WebP, BMP).

use crate::domain::media::RawImage;
use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;

/// Decoded pixels together with the handle used to draw them.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    raw: RawImage,
}

impl ImageData {
    /// Wraps decoded pixels. The handle shares nothing with `raw`; Iced
    /// uploads its own copy.
    #[must_use]
    pub fn from_raw(raw: RawImage) -> Self {
        let handle = image::Handle::from_rgba(raw.width(), raw.height(), raw.rgba_bytes().to_vec());
        Self { handle, raw }
    }

    #[must_use]
    pub fn raw(&self) -> &RawImage {
        &self.raw
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.raw.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.raw.height()
    }

    /// Size of the pixel buffer in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.raw.rgba_bytes().len()
    }
}

/// Decodes encoded bytes into straight RGBA pixels.
///
/// # Errors
///
/// Returns [`Error::Image`] if the format is unknown or the data is corrupted.
pub fn decode(bytes: &[u8]) -> Result<RawImage> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    let pixels = img.to_rgba8().into_vec();
    RawImage::from_rgba(width, height, pixels)
        .ok_or_else(|| Error::Image(format!("invalid dimensions {width}x{height}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image_rs::ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_png() {
        let raw = decode(&png(3, 2)).expect("decode");
        assert_eq!((raw.width(), raw.height()), (3, 2));
        assert_eq!(&raw.rgba_bytes()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(decode(b"not an image"), Err(Error::Image(_))));
    }

    #[test]
    fn image_data_reports_dimensions() {
        let data = ImageData::from_raw(decode(&png(4, 5)).expect("decode"));
        assert_eq!((data.width(), data.height()), (4, 5));
        assert_eq!(data.size_bytes(), 4 * 5 * 4);
    }
}
