// SPDX-License-Identifier: MPL-2.0
//! Visibility registry for deferred images.
//!
//! Interested parties [`register`](VisibilityObserver::register) a key and
//! keep the returned [`Registration`]. The view layer reports visible area
//! ratios; the first report at or above the threshold fires the key and
//! disposes its entry. A registration can be dropped early with
//! [`unregister`](VisibilityObserver::unregister), for example when the
//! carousel that asked for it closes before the image was ever seen.

use crate::app::config::DEFAULT_LAZY_VISIBILITY_THRESHOLD;
use std::collections::HashMap;
use std::hash::Hash;

/// Handle proving a key is observed. Stale handles do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registration(u64);

#[derive(Debug, Clone)]
pub struct VisibilityObserver<K> {
    threshold: f32,
    entries: HashMap<K, Registration>,
    next_id: u64,
}

impl<K: Eq + Hash + Clone> Default for VisibilityObserver<K> {
    fn default() -> Self {
        Self::new(DEFAULT_LAZY_VISIBILITY_THRESHOLD)
    }
}

impl<K: Eq + Hash + Clone> VisibilityObserver<K> {
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            entries: HashMap::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Starts observing `key`. Registering an observed key returns its
    /// existing handle.
    pub fn register(&mut self, key: K) -> Registration {
        if let Some(existing) = self.entries.get(&key) {
            return *existing;
        }
        let registration = Registration(self.next_id);
        self.next_id += 1;
        self.entries.insert(key, registration);
        registration
    }

    /// Stops observing the key behind `registration`.
    pub fn unregister(&mut self, registration: Registration) -> bool {
        let before = self.entries.len();
        self.entries.retain(|_, r| *r != registration);
        self.entries.len() < before
    }

    /// Reports the visible ratio of `key`. Returns `true` if this report
    /// fired the entry; it is disposed in the same call.
    pub fn report(&mut self, key: &K, ratio: f32) -> bool {
        if ratio >= self.threshold && self.entries.contains_key(key) {
            self.entries.remove(key);
            return true;
        }
        false
    }

    /// Reports many keys at once and returns the ones that fired.
    pub fn report_all<I>(&mut self, reports: I) -> Vec<K>
    where
        I: IntoIterator<Item = (K, f32)>,
    {
        reports
            .into_iter()
            .filter_map(|(key, ratio)| self.report(&key, ratio).then_some(key))
            .collect()
    }

    #[must_use]
    pub fn is_observing(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fraction of `item` (top, height) inside `viewport` (top, height), in `[0, 1]`.
#[must_use]
pub fn visible_ratio(item_top: f32, item_height: f32, viewport_top: f32, viewport_height: f32) -> f32 {
    if item_height <= 0.0 {
        return 0.0;
    }
    let top = item_top.max(viewport_top);
    let bottom = (item_top + item_height).min(viewport_top + viewport_height);
    ((bottom - top).max(0.0) / item_height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_threshold_then_disposes() {
        let mut observer = VisibilityObserver::new(0.1);
        observer.register("card");
        assert!(!observer.report(&"card", 0.05));
        assert!(observer.is_observing(&"card"));
        assert!(observer.report(&"card", 0.1));
        assert!(!observer.is_observing(&"card"));
        assert!(!observer.report(&"card", 1.0));
    }

    #[test]
    fn unregister_before_trigger() {
        let mut observer = VisibilityObserver::default();
        let registration = observer.register(7_u32);
        assert!(observer.unregister(registration));
        assert!(!observer.report(&7, 1.0));
        assert!(!observer.unregister(registration));
    }

    #[test]
    fn duplicate_register_shares_handle() {
        let mut observer = VisibilityObserver::default();
        let a = observer.register(1_u8);
        let b = observer.register(1_u8);
        assert_eq!(a, b);
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn report_all_returns_fired_keys() {
        let mut observer = VisibilityObserver::new(0.5);
        for key in 0..4_u8 {
            observer.register(key);
        }
        let fired = observer.report_all([(0, 0.6), (1, 0.2), (2, 0.5), (9, 1.0)]);
        assert_eq!(fired, vec![0, 2]);
        assert_eq!(observer.len(), 2);
    }

    #[test]
    fn ratio_of_partially_visible_item() {
        assert_eq!(visible_ratio(0.0, 100.0, 0.0, 500.0), 1.0);
        assert!((visible_ratio(450.0, 100.0, 0.0, 500.0) - 0.5).abs() < 1e-6);
        assert_eq!(visible_ratio(600.0, 100.0, 0.0, 500.0), 0.0);
        assert!((visible_ratio(-90.0, 100.0, 0.0, 500.0) - 0.1).abs() < 1e-5);
    }
}
