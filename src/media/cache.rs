// SPDX-License-Identifier: MPL-2.0
//! Decoded image cache.
//!
//! Carousels on the storefront grid revisit the same urls while shoppers
//! swipe back and forth. Decoded images are kept in an LRU cache bounded both
//! by entry count and by total pixel bytes.
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = ImageCache::new(64);
//! if let Some(image) = cache.get(url) {
//!     // draw immediately
//! }
//! cache.insert(url.to_string(), decoded);
//! ```

use crate::app::config::MIN_IMAGE_CACHE_ENTRIES;
use crate::media::ImageData;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Total decoded bytes kept at most (256 MB).
pub const MAX_CACHE_BYTES: usize = 256 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub total_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

pub struct ImageCache {
    cache: LruCache<String, ImageData>,
    max_bytes: usize,
    current_bytes: usize,
    stats: CacheStats,
}

impl ImageCache {
    /// Creates a cache holding at most `max_entries` images (at least
    /// [`MIN_IMAGE_CACHE_ENTRIES`]).
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        Self::with_byte_limit(max_entries, MAX_CACHE_BYTES)
    }

    #[must_use]
    pub fn with_byte_limit(max_entries: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(MIN_IMAGE_CACHE_ENTRIES))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            max_bytes,
            current_bytes: 0,
            stats: CacheStats::default(),
        }
    }

    /// Inserts a decoded image. Images larger than half the byte budget are
    /// not cached; returns whether the image was stored.
    pub fn insert(&mut self, url: String, image: ImageData) -> bool {
        let size = image.size_bytes();
        if size > self.max_bytes / 2 {
            return false;
        }

        if let Some(existing) = self.cache.pop(&url) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.size_bytes());
        }

        while self.current_bytes + size > self.max_bytes {
            let Some((_, evicted)) = self.cache.pop_lru() else {
                break;
            };
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
            self.stats.evictions += 1;
        }

        if let Some((_, evicted)) = self.cache.push(url, image) {
            // The key was popped above, so this is a capacity eviction.
            self.current_bytes = self.current_bytes.saturating_sub(evicted.size_bytes());
            self.stats.evictions += 1;
        }
        self.current_bytes += size;
        self.stats.entries = self.cache.len();
        self.stats.total_bytes = self.current_bytes;
        true
    }

    /// Returns the cached image for `url`, updating LRU order.
    pub fn get(&mut self, url: &str) -> Option<ImageData> {
        if let Some(image) = self.cache.get(url) {
            self.stats.hits += 1;
            Some(image.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.cache.contains(url)
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.current_bytes = 0;
        self.stats.entries = 0;
        self.stats.total_bytes = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("stats", &self.stats)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::RawImage;

    fn image(side: u32) -> ImageData {
        ImageData::from_raw(RawImage::solid(side, side, [0, 0, 0, 255]).expect("valid"))
    }

    #[test]
    fn hit_and_miss_are_counted() {
        let mut cache = ImageCache::new(8);
        assert!(cache.insert("a".into(), image(2)));
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
        assert!((stats.hit_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn entry_limit_evicts_least_recent() {
        let mut cache = ImageCache::new(MIN_IMAGE_CACHE_ENTRIES);
        for i in 0..MIN_IMAGE_CACHE_ENTRIES {
            cache.insert(format!("{i}"), image(1));
        }
        cache.get("0");
        cache.insert("new".into(), image(1));

        assert_eq!(cache.len(), MIN_IMAGE_CACHE_ENTRIES);
        assert!(cache.contains("0"));
        assert!(!cache.contains("1"));
        assert_eq!(cache.stats().total_bytes, MIN_IMAGE_CACHE_ENTRIES * 4);
    }

    #[test]
    fn byte_limit_evicts() {
        // 10x10 RGBA = 400 bytes each; budget fits two.
        let mut cache = ImageCache::with_byte_limit(16, 800);
        cache.insert("a".into(), image(10));
        cache.insert("b".into(), image(10));
        cache.insert("c".into(), image(10));
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains("a"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn oversized_images_are_skipped() {
        let mut cache = ImageCache::with_byte_limit(16, 100);
        assert!(!cache.insert("big".into(), image(10)));
        assert!(cache.is_empty());
    }

    #[test]
    fn reinserting_replaces_size() {
        let mut cache = ImageCache::new(8);
        cache.insert("a".into(), image(2));
        cache.insert("a".into(), image(3));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().total_bytes, 36);
    }
}
