// SPDX-License-Identifier: MPL-2.0
//! Carousel index state machine and the playback flags of the visible item.
//!
//! `current_index` is `None` exactly when the carousel is empty and otherwise
//! always points inside the sequence: every mutation goes through
//! [`CarouselState::move_to`], which only accepts in-range targets.

use crate::domain::video::PlaybackEvent;

/// An index change, reported so the caller can stop the outgoing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    current_index: Option<usize>,
    is_playing: bool,
    is_muted: bool,
}

impl CarouselState {
    /// Starts on the first item, paused and muted.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current_index: (len > 0).then_some(0),
            is_playing: false,
            is_muted: true,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    /// Dots, arrows and swipes only exist with more than one item.
    #[must_use]
    pub fn has_navigation(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) -> Option<Transition> {
        let current = self.current_index?;
        self.move_to((current + 1) % self.len)
    }

    pub fn previous(&mut self) -> Option<Transition> {
        let current = self.current_index?;
        self.move_to((current + self.len - 1) % self.len)
    }

    /// Jumps to `index`. Out-of-range targets are ignored. Selecting the
    /// current item still counts as a transition and pauses it.
    pub fn go_to(&mut self, index: usize) -> Option<Transition> {
        self.move_to(index)
    }

    fn move_to(&mut self, index: usize) -> Option<Transition> {
        let from = self.current_index?;
        if index >= self.len {
            return None;
        }
        self.current_index = Some(index);
        self.is_playing = false;
        Some(Transition { from, to: index })
    }

    /// Inverts `is_playing` when `current_is_video`; returns whether it did.
    pub fn toggle_play_pause(&mut self, current_is_video: bool) -> bool {
        if !current_is_video || self.current_index.is_none() {
            return false;
        }
        self.is_playing = !self.is_playing;
        true
    }

    /// Clears `is_playing` after the host stopped the video.
    pub fn stop_playback(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }

    /// Applies a surface event for the item at `index`. Events about any other
    /// item are stale and ignored; returns whether the event was applied.
    pub fn observe(&mut self, index: usize, event: &PlaybackEvent) -> bool {
        if self.current_index != Some(index) {
            return false;
        }
        self.is_playing = event.is_playing();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::video::PlaybackFailure;

    #[test]
    fn empty_carousel_has_no_index_and_ignores_navigation() {
        let mut state = CarouselState::new(0);
        assert_eq!(state.current_index(), None);
        assert_eq!(state.next(), None);
        assert_eq!(state.previous(), None);
        assert_eq!(state.go_to(0), None);
        assert!(!state.has_navigation());
        assert!(!state.toggle_play_pause(true));
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut state = CarouselState::new(3);
        assert_eq!(state.previous(), Some(Transition { from: 0, to: 2 }));
        assert_eq!(state.next(), Some(Transition { from: 2, to: 0 }));
        state.next();
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn n_steps_return_to_start() {
        for len in 1..7 {
            let mut state = CarouselState::new(len);
            state.go_to(len / 2);
            let start = state.current_index();
            for _ in 0..len {
                state.next();
            }
            assert_eq!(state.current_index(), start);
            for _ in 0..len {
                state.previous();
            }
            assert_eq!(state.current_index(), start);
        }
    }

    #[test]
    fn go_to_out_of_range_is_ignored() {
        let mut state = CarouselState::new(2);
        assert_eq!(state.go_to(2), None);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn every_transition_pauses_and_keeps_mute() {
        let mut state = CarouselState::new(3);
        state.go_to(2);
        assert!(state.toggle_play_pause(true));
        state.toggle_mute();
        assert!(state.is_playing());

        state.go_to(2);
        assert!(!state.is_playing());
        assert!(!state.is_muted());

        state.toggle_play_pause(true);
        state.previous();
        assert!(!state.is_playing());
        assert!(!state.is_muted());
    }

    #[test]
    fn play_toggle_requires_video() {
        let mut state = CarouselState::new(2);
        assert!(!state.toggle_play_pause(false));
        assert!(!state.is_playing());
    }

    #[test]
    fn observer_corrects_flag_for_current_item_only() {
        let mut state = CarouselState::new(3);
        state.go_to(2);
        assert!(state.observe(2, &PlaybackEvent::Started));
        assert!(state.is_playing());

        assert!(!state.observe(0, &PlaybackEvent::Ended));
        assert!(state.is_playing());

        assert!(state.observe(2, &PlaybackEvent::Errored(PlaybackFailure::Unsupported)));
        assert!(!state.is_playing());
    }
}
