// SPDX-License-Identifier: MPL-2.0
//! Crop rasterization.
//!
//! A crop is rendered in two passes:
//!
//! 1. The source is drawn onto an intermediate surface sized to the preview
//!    viewport with `translate(center) · rotate · scale · translate(offset)`,
//!    the image centered on the origin at its natural size.
//! 2. The intermediate surface is copied into the output buffer, resampled
//!    only when the output width differs from the viewport width.
//!
//! The live preview is pass 1 itself, so the applied crop always matches what
//! the operator saw.

use crate::domain::editing::{AspectRatio, CropTransform};
use crate::domain::media::RawImage;
use image_rs::imageops::FilterType;
use thiserror::Error;
use tiny_skia::{ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropError {
    #[error("source image is not loaded")]
    SourceNotLoaded,

    #[error("failed to allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },

    #[error("failed to encode crop: {0}")]
    Encode(String),
}

impl CropError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CropError::SourceNotLoaded => "error-crop-source-not-loaded",
            CropError::Surface { .. } => "error-crop-surface",
            CropError::Encode(_) => "error-crop-encode",
        }
    }
}

/// Viewport and output sizes of a crop session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropGeometry {
    pub aspect: AspectRatio,
    pub reference_width: u32,
    pub output_width: u32,
}

impl CropGeometry {
    #[must_use]
    pub fn new(aspect: AspectRatio, reference_width: u32, output_width: u32) -> Self {
        Self {
            aspect,
            reference_width: reference_width.max(1),
            output_width: output_width.max(1),
        }
    }

    /// Preview viewport in pixels (400 x 533 for 3:4 at the default width).
    #[must_use]
    pub fn viewport_size(&self) -> (u32, u32) {
        (
            self.reference_width,
            self.aspect.height_for_width(self.reference_width),
        )
    }

    #[must_use]
    pub fn output_size(&self) -> (u32, u32) {
        (
            self.output_width,
            self.aspect.height_for_width(self.output_width),
        )
    }
}

/// Affine transform mapping source pixels into the viewport.
#[must_use]
pub fn viewport_transform(
    transform: &CropTransform,
    viewport: (u32, u32),
    source: (u32, u32),
) -> Transform {
    let (vw, vh) = (viewport.0 as f32, viewport.1 as f32);
    let (sw, sh) = (source.0 as f32, source.1 as f32);
    let scale = transform.scale().value();
    let offset = transform.translation();

    Transform::from_translate(vw / 2.0, vh / 2.0)
        .pre_concat(Transform::from_rotate(transform.rotation().value()))
        .pre_concat(Transform::from_scale(scale, scale))
        .pre_concat(Transform::from_translate(offset.x, offset.y))
        .pre_concat(Transform::from_translate(-sw / 2.0, -sh / 2.0))
}

/// A source image converted once to premultiplied pixels, ready to be drawn
/// any number of times.
#[derive(Debug, Clone)]
pub struct SourceSurface {
    pixmap: Pixmap,
}

impl SourceSurface {
    /// # Errors
    ///
    /// Returns [`CropError::Surface`] if the surface cannot be allocated.
    pub fn from_raw(image: &RawImage) -> Result<Self, CropError> {
        let (width, height) = (image.width(), image.height());
        let mut pixmap = Pixmap::new(width, height).ok_or(CropError::Surface { width, height })?;
        for (dst, src) in pixmap
            .pixels_mut()
            .iter_mut()
            .zip(image.rgba_bytes().chunks_exact(4))
        {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Ok(Self { pixmap })
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }
}

fn to_raw(pixmap: &Pixmap) -> Result<RawImage, CropError> {
    let bytes = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    RawImage::from_rgba(pixmap.width(), pixmap.height(), bytes).ok_or(CropError::Surface {
        width: pixmap.width(),
        height: pixmap.height(),
    })
}

/// Pass 1: renders the transformed source into a viewport-sized image.
///
/// # Errors
///
/// Returns [`CropError::Surface`] if a surface cannot be allocated.
pub fn render_viewport(
    source: &RawImage,
    transform: &CropTransform,
    geometry: &CropGeometry,
) -> Result<RawImage, CropError> {
    render_surface(&SourceSurface::from_raw(source)?, transform, geometry)
}

/// Pass 1 from an already converted source. The live preview renders this
/// way on every pointer move.
///
/// # Errors
///
/// Returns [`CropError::Surface`] if a surface cannot be allocated.
pub fn render_surface(
    source: &SourceSurface,
    transform: &CropTransform,
    geometry: &CropGeometry,
) -> Result<RawImage, CropError> {
    let (width, height) = geometry.viewport_size();
    let mut surface = Pixmap::new(width, height).ok_or(CropError::Surface { width, height })?;

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    surface.draw_pixmap(
        0,
        0,
        source.pixmap.as_ref(),
        &paint,
        viewport_transform(transform, (width, height), source.size()),
        None,
    );
    to_raw(&surface)
}

/// Runs both passes and returns the output pixels.
///
/// # Errors
///
/// Returns [`CropError::Surface`] if a surface cannot be allocated.
pub fn rasterize(
    source: &RawImage,
    transform: &CropTransform,
    geometry: &CropGeometry,
) -> Result<RawImage, CropError> {
    let intermediate = render_viewport(source, transform, geometry)?;
    let (out_width, out_height) = geometry.output_size();
    if (out_width, out_height) == (intermediate.width(), intermediate.height()) {
        return Ok(intermediate);
    }

    let buffer = image_rs::RgbaImage::from_raw(
        intermediate.width(),
        intermediate.height(),
        intermediate.rgba_bytes().to_vec(),
    )
    .ok_or(CropError::Surface {
        width: intermediate.width(),
        height: intermediate.height(),
    })?;
    let resized = image_rs::imageops::resize(&buffer, out_width, out_height, FilterType::Lanczos3);
    RawImage::from_rgba(out_width, out_height, resized.into_vec()).ok_or(CropError::Surface {
        width: out_width,
        height: out_height,
    })
}

/// Encodes as JPEG. Transparent pixels are composited onto black.
///
/// # Errors
///
/// Returns [`CropError::Encode`] if the encoder fails.
pub fn encode_jpeg(image: &RawImage, quality: u8) -> Result<Vec<u8>, CropError> {
    let rgb: Vec<u8> = image
        .rgba_bytes()
        .chunks_exact(4)
        .flat_map(|px| {
            let alpha = u16::from(px[3]);
            let blend = |c: u8| ((u16::from(c) * alpha + 127) / 255) as u8;
            [blend(px[0]), blend(px[1]), blend(px[2])]
        })
        .collect();

    let mut out = Vec::new();
    image_rs::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .encode(
            &rgb,
            image.width(),
            image.height(),
            image_rs::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CropError::Encode(e.to_string()))?;
    Ok(out)
}

/// Full crop: both passes then JPEG encoding.
///
/// # Errors
///
/// Returns [`CropError::SourceNotLoaded`] when `source` is `None`, otherwise
/// any error from [`rasterize`] or [`encode_jpeg`].
pub fn apply_crop(
    source: Option<&RawImage>,
    transform: &CropTransform,
    geometry: &CropGeometry,
    quality: u8,
) -> Result<Vec<u8>, CropError> {
    let source = source.ok_or(CropError::SourceNotLoaded)?;
    let output = rasterize(source, transform, geometry)?;
    encode_jpeg(&output, quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::editing::Offset;

    const RED: [u8; 4] = [220, 20, 20, 255];
    const BLUE: [u8; 4] = [20, 20, 220, 255];

    fn geometry(output_width: u32) -> CropGeometry {
        CropGeometry::new(AspectRatio::default(), 40, output_width)
    }

    /// Left half red, right half blue.
    fn split(width: u32, height: u32) -> RawImage {
        let mut bytes = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..height {
            for x in 0..width {
                bytes.extend_from_slice(if x < width / 2 { &RED } else { &BLUE });
            }
        }
        RawImage::from_rgba(width, height, bytes).expect("valid")
    }

    fn pixel(image: &RawImage, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * image.width() + x) * 4) as usize;
        let p = &image.rgba_bytes()[i..i + 4];
        [p[0], p[1], p[2], p[3]]
    }

    fn close(a: [u8; 4], b: [u8; 4]) -> bool {
        a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
    }

    #[test]
    fn geometry_sizes() {
        let g = CropGeometry::new(AspectRatio::default(), 400, 800);
        assert_eq!(g.viewport_size(), (400, 533));
        assert_eq!(g.output_size(), (800, 1066));
    }

    #[test]
    fn identity_reproduces_viewport_sized_source() {
        let source = split(40, 53);
        let out = rasterize(&source, &CropTransform::new(), &geometry(40)).expect("rasterize");
        assert_eq!((out.width(), out.height()), (40, 53));
        for (x, y) in [(0, 0), (19, 10), (20, 10), (39, 52)] {
            assert!(close(pixel(&out, x, y), pixel(&source, x, y)), "pixel {x},{y}");
        }
    }

    #[test]
    fn translation_uncovers_transparent_area() {
        let source = split(40, 53);
        let mut transform = CropTransform::new();
        transform.set_translation(Offset::new(10.0, 0.0));
        let out = render_viewport(&source, &transform, &geometry(40)).expect("render");
        assert_eq!(pixel(&out, 2, 20)[3], 0);
        assert!(close(pixel(&out, 15, 20), RED));
    }

    #[test]
    fn converted_source_renders_like_raw_source() {
        let source = split(40, 53);
        let surface = SourceSurface::from_raw(&source).expect("surface");
        assert_eq!(surface.size(), (40, 53));

        let mut transform = CropTransform::new();
        transform.set_scale(1.3);
        transform.set_translation(Offset::new(-4.0, 3.0));
        for _ in 0..3 {
            assert_eq!(
                render_surface(&surface, &transform, &geometry(40)),
                render_viewport(&source, &transform, &geometry(40))
            );
            transform.set_translation(Offset::new(6.0, -2.0));
        }
    }

    #[test]
    fn half_turn_swaps_sides() {
        let source = split(40, 53);
        let mut transform = CropTransform::new();
        transform.rotate_clockwise();
        transform.rotate_clockwise();
        let out = render_viewport(&source, &transform, &geometry(40)).expect("render");
        assert!(close(pixel(&out, 5, 20), BLUE));
        assert!(close(pixel(&out, 35, 20), RED));
    }

    #[test]
    fn output_is_resampled_to_configured_width() {
        let source = split(40, 53);
        let out = rasterize(&source, &CropTransform::new(), &geometry(80)).expect("rasterize");
        assert_eq!((out.width(), out.height()), (80, 106));
    }

    #[test]
    fn missing_source_produces_nothing() {
        assert_eq!(
            apply_crop(None, &CropTransform::new(), &geometry(40), 90),
            Err(CropError::SourceNotLoaded)
        );
    }

    #[test]
    fn jpeg_round_trip_is_close() {
        let source = split(40, 53);
        let bytes =
            apply_crop(Some(&source), &CropTransform::new(), &geometry(40), 90).expect("crop");
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = crate::media::decode(&bytes).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (40, 53));
        let p = pixel(&decoded, 5, 5);
        assert!(p[0] > 180 && p[2] < 70, "expected red, got {p:?}");
    }

    #[test]
    fn transparent_pixels_become_black() {
        let image = RawImage::solid(8, 8, [255, 255, 255, 0]).expect("valid");
        let bytes = encode_jpeg(&image, 90).expect("encode");
        let decoded = crate::media::decode(&bytes).expect("decode");
        assert!(pixel(&decoded, 4, 4)[..3].iter().all(|c| *c < 8));
    }
}
