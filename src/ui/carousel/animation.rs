// SPDX-License-Identifier: MPL-2.0
//! Slide animation of the carousel strip.
//!
//! The strip position is measured in item widths: `0.0` shows the first item,
//! `1.5` shows the right half of the first and the left half of the second.
//! A new target while animating restarts from wherever the strip currently
//! is, so rapid clicks never jump.

use std::time::{Duration, Instant};

/// Cubic ease-in-out on `[0, 1]`.
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideAnimation {
    duration: Duration,
    from: f32,
    to: f32,
    started_at: Option<Instant>,
}

impl SlideAnimation {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            from: 0.0,
            to: 0.0,
            started_at: None,
        }
    }

    /// Strip position at `now`.
    #[must_use]
    pub fn position(&self, now: Instant) -> f32 {
        let Some(started) = self.started_at else {
            return self.to;
        };
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        let t = elapsed / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    /// Starts sliding toward `index` from the current visual position.
    pub fn slide_to(&mut self, index: usize, now: Instant) {
        self.from = self.position(now);
        #[allow(clippy::cast_precision_loss)]
        {
            self.to = index as f32;
        }
        self.started_at = Some(now);
    }

    /// Jumps without animating.
    pub fn snap_to(&mut self, index: usize) {
        #[allow(clippy::cast_precision_loss)]
        {
            self.to = index as f32;
        }
        self.from = self.to;
        self.started_at = None;
    }

    /// Clears the running flag once the duration elapsed; returns whether the
    /// strip is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(started) = self.started_at {
            if now.saturating_duration_since(started) >= self.duration {
                self.started_at = None;
                self.from = self.to;
            }
        }
        self.is_animating()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.started_at.is_some()
    }
}

/// One item visible through the strip window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleSlice {
    pub index: usize,
    /// Visible fraction of the item width, in `(0, 1]`.
    pub fraction: f32,
    /// `true` when the item's right edge is in view (it is leaving to the left).
    pub anchored_right: bool,
}

/// Items visible at strip `position`: one when settled, two mid-slide.
#[must_use]
pub fn visible_slices(position: f32, len: usize) -> Vec<VisibleSlice> {
    if len == 0 {
        return Vec::new();
    }
    #[allow(clippy::cast_precision_loss)]
    let max = (len - 1) as f32;
    let position = position.clamp(0.0, max);
    let base = position.floor();
    let frac = position - base;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let first = base as usize;

    if frac <= f32::EPSILON || first + 1 >= len {
        return vec![VisibleSlice {
            index: first,
            fraction: 1.0,
            anchored_right: false,
        }];
    }
    vec![
        VisibleSlice {
            index: first,
            fraction: 1.0 - frac,
            anchored_right: true,
        },
        VisibleSlice {
            index: first + 1,
            fraction: frac,
            anchored_right: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_300: Duration = Duration::from_millis(300);

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
    }

    #[test]
    fn slide_reaches_target_after_duration() {
        let t0 = Instant::now();
        let mut animation = SlideAnimation::new(MS_300);
        animation.slide_to(2, t0);
        assert_eq!(animation.position(t0), 0.0);
        assert!(animation.tick(t0 + Duration::from_millis(100)));
        assert!(!animation.tick(t0 + MS_300));
        assert_eq!(animation.position(t0 + MS_300), 2.0);
    }

    #[test]
    fn retarget_starts_from_current_position() {
        let t0 = Instant::now();
        let mut animation = SlideAnimation::new(MS_300);
        animation.slide_to(1, t0);
        let mid = t0 + Duration::from_millis(150);
        let at_mid = animation.position(mid);
        animation.slide_to(0, mid);
        assert!((animation.position(mid) - at_mid).abs() < 1e-6);
        assert_eq!(animation.position(mid + MS_300), 0.0);
    }

    #[test]
    fn snap_stops_animation() {
        let mut animation = SlideAnimation::new(MS_300);
        animation.slide_to(3, Instant::now());
        animation.snap_to(1);
        assert!(!animation.is_animating());
        assert_eq!(animation.position(Instant::now()), 1.0);
    }

    #[test]
    fn slices_split_between_neighbours() {
        assert_eq!(visible_slices(0.0, 0), Vec::new());
        let settled = visible_slices(2.0, 3);
        assert_eq!(settled.len(), 1);
        assert_eq!(settled[0].index, 2);

        let mid = visible_slices(0.25, 3);
        assert_eq!(mid.len(), 2);
        assert_eq!((mid[0].index, mid[1].index), (0, 1));
        assert!((mid[0].fraction - 0.75).abs() < 1e-6);
        assert!(mid[0].anchored_right);
        assert!(!mid[1].anchored_right);
    }
}
