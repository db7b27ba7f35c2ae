#![forbid(unsafe_code)]

//! The interface an event pump drives.
//!
//! A dialog receives one call per discrete press and one tick per frame,
//! and exposes a read-only view for rendering. It knows nothing about the
//! window, the clock, or the device that produced the actions.

use crate::action::Action;

/// Outcome of a session. Terminal once it leaves `Pending`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionResult {
    #[default]
    Pending,
    Committed(String),
    Cancelled,
}

impl SessionResult {
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn committed_text(&self) -> Option<&str> {
        match self {
            Self::Committed(text) => Some(text),
            _ => None,
        }
    }
}

pub trait Dialog {
    /// Per-frame view handed to the render layer.
    type State<'a>
    where
        Self: 'a;

    /// Handle a discrete press. Returns `true` when a redraw is needed.
    fn process_action(&mut self, action: Action) -> bool;

    /// Advance one frame with the currently held action, if any.
    /// Returns `true` when a redraw is needed.
    fn tick(&mut self, held: Option<Action>) -> bool;

    fn observe(&self) -> Self::State<'_>;

    fn result(&self) -> &SessionResult;

    /// Whether the caret should be drawn steadily instead of blinking.
    fn caret_pinned(&self) -> bool {
        false
    }
}
