// SPDX-License-Identifier: MPL-2.0
//! Horizontal swipe detection
//!
//! The pointer is sampled when the gesture starts and on every move while it
//! is held; only the first and last samples matter.

use crate::app::config::DEFAULT_SWIPE_THRESHOLD_PX;

/// Outcome of a released gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Pointer travelled left: show the next item.
    Next,
    /// Pointer travelled right: show the previous item.
    Previous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold: f32,
    /// Last known pointer x, kept while the pointer hovers.
    pointer_x: Option<f32>,
    start_x: Option<f32>,
    end_x: Option<f32>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD_PX)
    }
}

impl SwipeTracker {
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.max(0.0),
            pointer_x: None,
            start_x: None,
            end_x: None,
        }
    }

    /// Pointer moved inside the carousel.
    pub fn pointer_moved(&mut self, x: f32) {
        self.pointer_x = Some(x);
        if self.start_x.is_some() {
            self.end_x = Some(x);
        }
    }

    /// Gesture starts at the last known pointer position.
    pub fn press(&mut self) {
        self.start_x = self.pointer_x;
        self.end_x = None;
    }

    /// Pointer left the carousel; any gesture in progress is dropped.
    pub fn cancel(&mut self) {
        self.pointer_x = None;
        self.start_x = None;
        self.end_x = None;
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// Ends the gesture. `item_count <= 1` never produces a swipe.
    pub fn release(&mut self, item_count: usize) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let end = self.end_x.take()?;
        if item_count <= 1 {
            return None;
        }
        classify(start - end, self.threshold)
    }
}

/// `delta = start_x - end_x`; the threshold itself is not enough.
#[must_use]
pub fn classify(delta: f32, threshold: f32) -> Option<Swipe> {
    if delta > threshold {
        Some(Swipe::Next)
    } else if delta < -threshold {
        Some(Swipe::Previous)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(tracker: &mut SwipeTracker, from: f32, to: f32, items: usize) -> Option<Swipe> {
        tracker.pointer_moved(from);
        tracker.press();
        tracker.pointer_moved((from + to) / 2.0);
        tracker.pointer_moved(to);
        tracker.release(items)
    }

    #[test]
    fn threshold_boundary() {
        assert_eq!(classify(50.0, 50.0), None);
        assert_eq!(classify(-50.0, 50.0), None);
        assert_eq!(classify(50.01, 50.0), Some(Swipe::Next));
        assert_eq!(classify(-50.01, 50.0), Some(Swipe::Previous));
    }

    #[test]
    fn left_drag_is_next() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(gesture(&mut tracker, 200.0, 100.0, 3), Some(Swipe::Next));
        assert_eq!(gesture(&mut tracker, 100.0, 200.0, 3), Some(Swipe::Previous));
        assert_eq!(gesture(&mut tracker, 100.0, 140.0, 3), None);
    }

    #[test]
    fn release_without_movement_is_noop() {
        let mut tracker = SwipeTracker::default();
        tracker.pointer_moved(300.0);
        tracker.press();
        assert_eq!(tracker.release(3), None);
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn single_item_never_swipes() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(gesture(&mut tracker, 300.0, 0.0, 1), None);
    }

    #[test]
    fn cancel_drops_gesture() {
        let mut tracker = SwipeTracker::default();
        tracker.pointer_moved(300.0);
        tracker.press();
        tracker.pointer_moved(100.0);
        tracker.cancel();
        assert_eq!(tracker.release(3), None);
    }

    #[test]
    fn press_before_any_move_has_no_start() {
        let mut tracker = SwipeTracker::default();
        tracker.press();
        tracker.pointer_moved(10.0);
        assert_eq!(tracker.release(3), None);
    }
}
