// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.
//! A [`MediaItem`] is the single tagged reference every consumer matches on;
//! a [`MediaSequence`] is the ordered list a carousel presents.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind of a media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies an upload by its MIME type (`video/*` is a video, anything else an image).
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    #[must_use]
    pub fn is_video(self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// A single image or video reference.
///
/// The url is opaque: it is only ever checked for being non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaItem {
    kind: MediaKind,
    url: String,
}

impl MediaItem {
    /// Builds an item, rejecting empty or whitespace-only references.
    #[must_use]
    pub fn new(kind: MediaKind, url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            None
        } else {
            Some(Self { kind, url })
        }
    }

    #[must_use]
    pub fn image(url: impl Into<String>) -> Option<Self> {
        Self::new(MediaKind::Image, url)
    }

    #[must_use]
    pub fn video(url: impl Into<String>) -> Option<Self> {
        Self::new(MediaKind::Video, url)
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind.is_video()
    }
}

/// Ordered media shown by a carousel: images first, then videos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSequence {
    items: Vec<MediaItem>,
}

impl MediaSequence {
    /// Builds a sequence from raw image and video references.
    ///
    /// Blank entries are dropped from each list independently; the order
    /// inside each list is preserved and images always precede videos.
    pub fn build<I, V>(images: I, videos: V) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let images = images
            .into_iter()
            .filter_map(|url| MediaItem::image(url.as_ref()));
        let videos = videos
            .into_iter()
            .filter_map(|url| MediaItem::video(url.as_ref()));

        Self {
            items: images.chain(videos).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.iter()
    }

    /// First item, used as the catalog thumbnail.
    #[must_use]
    pub fn primary(&self) -> Option<&MediaItem> {
        self.items.first()
    }
}

impl FromIterator<MediaItem> for MediaSequence {
    fn from_iter<T: IntoIterator<Item = MediaItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Decoded RGBA pixels without presentation dependencies.
///
/// The presentation layer converts this into framework handles
/// (`iced::widget::image::Handle`), the crop rasterizer into a pixmap.
#[derive(Debug, Clone)]
pub struct RawImage {
    width: u32,
    height: u32,
    rgba_bytes: Arc<Vec<u8>>,
}

impl RawImage {
    /// Wraps RGBA pixels, returning `None` if the buffer length does not
    /// match `width * height * 4` or a dimension is zero.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Option<Self> {
        let expected_len = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || rgba_bytes.len() != expected_len {
            return None;
        }

        Some(Self {
            width,
            height,
            rgba_bytes: Arc::new(rgba_bytes),
        })
    }

    /// A single-color image.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Option<Self> {
        let pixel_count = (width as usize) * (height as usize);
        let bytes = rgba
            .iter()
            .copied()
            .cycle()
            .take(pixel_count * 4)
            .collect();
        Self::from_rgba(width, height, bytes)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }
}

impl PartialEq for RawImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rgba_bytes == other.rgba_bytes
    }
}

impl Eq for RawImage {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_references_are_rejected() {
        assert!(MediaItem::image("").is_none());
        assert!(MediaItem::image("   \t\n").is_none());
        assert!(MediaItem::video("clip.mp4").is_some());
    }

    #[test]
    fn build_puts_images_before_videos_and_keeps_order() {
        let sequence = MediaSequence::build(["a.jpg", " ", "b.jpg"], ["", "v1.mp4", "v2.mp4"]);

        let urls: Vec<&str> = sequence.iter().map(MediaItem::url).collect();
        assert_eq!(urls, vec!["a.jpg", "b.jpg", "v1.mp4", "v2.mp4"]);
        assert_eq!(sequence.get(1).map(MediaItem::kind), Some(MediaKind::Image));
        assert_eq!(sequence.get(2).map(MediaItem::kind), Some(MediaKind::Video));
    }

    #[test]
    fn build_length_counts_only_non_blank_entries() {
        let images = vec!["x".to_string(), String::new(), "  ".to_string(), "y".to_string()];
        let videos: Vec<String> = vec!["   ".to_string()];
        let sequence = MediaSequence::build(&images, &videos);
        assert_eq!(sequence.len(), 2);
    }

    #[test]
    fn empty_inputs_build_empty_sequence() {
        let sequence = MediaSequence::build(Vec::<String>::new(), Vec::<String>::new());
        assert!(sequence.is_empty());
        assert!(sequence.primary().is_none());
    }

    #[test]
    fn kind_from_mime() {
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("Video/WebM"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Image);
    }

    #[test]
    fn raw_image_validates_buffer_length() {
        assert!(RawImage::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(RawImage::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(RawImage::from_rgba(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn solid_image_repeats_color() {
        let image = RawImage::solid(3, 1, [1, 2, 3, 4]).expect("valid dimensions");
        assert_eq!(image.rgba_bytes(), &[1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]);
    }
}
