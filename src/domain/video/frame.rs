// SPDX-License-Identifier: MPL-2.0
//! Decoded video frames.

use std::sync::Arc;

/// One RGBA frame handed from a decoder to the screen.
///
/// Pixels are shared so a frame can be forwarded through several messages
/// without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    rgba: Arc<Vec<u8>>,
}

impl VideoFrame {
    /// Returns `None` unless `rgba` holds exactly `width * height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (width > 0 && height > 0 && rgba.len() == expected).then(|| Self {
            width,
            height,
            rgba: Arc::new(rgba),
        })
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
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Takes the pixels, copying only if the frame is still shared.
    #[must_use]
    pub fn into_rgba(self) -> Vec<u8> {
        Arc::try_unwrap(self.rgba).unwrap_or_else(|shared| (*shared).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_count_must_match() {
        assert!(VideoFrame::new(2, 2, vec![0; 16]).is_some());
        assert!(VideoFrame::new(2, 2, vec![0; 15]).is_none());
        assert!(VideoFrame::new(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn shared_frame_keeps_its_pixels_for_other_holders() {
        let frame = VideoFrame::new(1, 1, vec![1, 2, 3, 4]).unwrap();
        let other = frame.clone();
        assert_eq!(frame.into_rgba(), vec![1, 2, 3, 4]);
        assert_eq!(other.rgba(), &[1, 2, 3, 4]);
    }
}
