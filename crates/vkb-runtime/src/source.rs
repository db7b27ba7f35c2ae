#![forbid(unsafe_code)]

//! Where actions come from.
//!
//! An [`ActionSource`] is polled once per frame and returns everything that
//! happened since the previous poll. Device specifics (keyboard scancodes,
//! gamepad buttons, hats, axes) are resolved into [`Action`]s before they
//! get here.

use std::collections::VecDeque;

use vkb_core::Action;

/// One input event, already normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key-down. Handled as a discrete press, then held until released.
    Press(Action),
    /// Key-up.
    Release(Action),
    /// The host wants the session gone (window closed, signal).
    Quit,
}

/// Frame-granular event producer.
pub trait ActionSource {
    /// Events for the next frame, or `None` once the source is exhausted.
    ///
    /// An empty vector is an idle frame.
    fn next_frame(&mut self) -> Option<Vec<InputEvent>>;
}

impl<S: ActionSource + ?Sized> ActionSource for &mut S {
    fn next_frame(&mut self) -> Option<Vec<InputEvent>> {
        (**self).next_frame()
    }
}

/// Pre-recorded frames, replayed in order.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    frames: VecDeque<Vec<InputEvent>>,
}

impl FrameQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame.
    pub fn push(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Append `count` idle frames.
    pub fn push_idle(&mut self, count: usize) {
        self.frames
            .extend(std::iter::repeat_with(Vec::new).take(count));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<Vec<InputEvent>> for FrameQueue {
    fn from_iter<I: IntoIterator<Item = Vec<InputEvent>>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl ActionSource for FrameQueue {
    fn next_frame(&mut self) -> Option<Vec<InputEvent>> {
        self.frames.pop_front()
    }
}
