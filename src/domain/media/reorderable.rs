// SPDX-License-Identifier: MPL-2.0
//! Ordered, editable list of media entries with stable identities.
//!
//! Images and videos share one list while editing; saving splits it back by
//! kind, so the relative order of an image and a video is not persisted.

use super::types::MediaKind;
use crate::domain::ids::MediaId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub id: MediaId,
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderableMediaList {
    entries: Vec<MediaEntry>,
}

impl ReorderableMediaList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Images first, then videos, blank references dropped.
    #[must_use]
    pub fn from_parts(images: &[String], videos: &[String]) -> Self {
        let mut list = Self::new();
        for url in images {
            list.append(MediaKind::Image, url);
        }
        for url in videos {
            list.append(MediaKind::Video, url);
        }
        list
    }

    /// Adds an entry at the end under a fresh id. Blank urls are refused.
    pub fn append(&mut self, kind: MediaKind, url: &str) -> Option<MediaId> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        let id = MediaId::new();
        self.entries.push(MediaEntry {
            id,
            kind,
            url: url.to_string(),
        });
        Some(id)
    }

    pub fn remove(&mut self, id: MediaId) -> Option<MediaEntry> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Takes the entry at `from` out and reinserts it at `to`.
    ///
    /// Returns `false` when nothing moved (same index or out of range).
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.entries.len() || to >= self.entries.len() {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        true
    }

    /// Swaps the url of an entry in place, keeping its id and position.
    pub fn replace_url(&mut self, id: MediaId, url: &str) -> bool {
        let url = url.trim();
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) if !url.is_empty() => {
                entry.url = url.to_string();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn position(&self, id: MediaId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    #[must_use]
    pub fn get(&self, id: MediaId) -> Option<&MediaEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.kind == MediaKind::Image)
            .count()
    }

    /// Urls split by kind, each keeping list order.
    #[must_use]
    pub fn split(&self) -> (Vec<String>, Vec<String>) {
        let mut images = Vec::new();
        let mut videos = Vec::new();
        for entry in &self.entries {
            match entry.kind {
                MediaKind::Image => images.push(entry.url.clone()),
                MediaKind::Video => videos.push(entry.url.clone()),
            }
        }
        (images, videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(list: &ReorderableMediaList) -> Vec<&str> {
        list.iter().map(|entry| entry.url.as_str()).collect()
    }

    fn abc() -> ReorderableMediaList {
        ReorderableMediaList::from_parts(&["A".into(), "B".into(), "C".into()], &[])
    }

    #[test]
    fn reorder_scenario() {
        let mut list = abc();
        let ids: Vec<_> = list.iter().map(|entry| entry.id).collect();

        assert!(list.move_item(2, 0));
        assert_eq!(urls(&list), ["C", "A", "B"]);

        list.remove(ids[0]);
        assert_eq!(urls(&list), ["C", "B"]);

        list.append(MediaKind::Image, "D");
        assert_eq!(urls(&list), ["C", "B", "D"]);
    }

    #[test]
    fn move_round_trip_restores_order() {
        let original = abc();
        for i in 0..3 {
            for j in 0..3 {
                let mut list = original.clone();
                list.move_item(i, j);
                list.move_item(j, i);
                assert_eq!(list, original, "move({i}, {j}) then move({j}, {i})");
            }
        }
    }

    #[test]
    fn no_op_moves() {
        let mut list = abc();
        assert!(!list.move_item(1, 1));
        assert!(!list.move_item(0, 3));
        assert!(!list.move_item(5, 0));
        assert_eq!(urls(&list), ["A", "B", "C"]);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut list = abc();
        assert!(list.remove(MediaId::new()).is_none());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn append_assigns_fresh_ids_and_refuses_blank() {
        let mut list = ReorderableMediaList::new();
        let a = list.append(MediaKind::Image, "same.jpg");
        let b = list.append(MediaKind::Image, "same.jpg");
        assert!(a.is_some() && b.is_some());
        assert_ne!(a, b);
        assert_eq!(list.append(MediaKind::Video, "  "), None);
    }

    #[test]
    fn replace_url_keeps_identity_and_position() {
        let mut list = abc();
        let id = list.entries()[1].id;
        assert!(list.replace_url(id, "B-cropped.jpg"));
        assert_eq!(list.position(id), Some(1));
        assert_eq!(urls(&list), ["A", "B-cropped.jpg", "C"]);
        assert!(!list.replace_url(MediaId::new(), "x"));
    }

    #[test]
    fn split_by_kind_keeps_relative_order() {
        let mut list = ReorderableMediaList::from_parts(&["i1".into(), "i2".into()], &["v1".into()]);
        list.move_item(2, 0);
        list.move_item(2, 1);
        assert_eq!(urls(&list), ["v1", "i2", "i1"]);
        let (images, videos) = list.split();
        assert_eq!(images, ["i2", "i1"]);
        assert_eq!(videos, ["v1"]);
        assert_eq!(list.image_count(), 2);
    }
}
