#![forbid(unsafe_code)]

//! Keyboard session controller.
//!
//! [`KeyboardController`] owns all session state and is the only entry point
//! that mutates it. The owning loop calls
//! [`process_action`](KeyboardController::process_action) once per key-down
//! and [`tick`](KeyboardController::tick) once per frame with whatever action
//! is still held. Held actions auto-repeat through a [`RepeatTimer`]; the
//! timer restarts whenever the held action changes.
//!
//! Once the session is committed or cancelled every further call is ignored.

use crate::action::Action;
use crate::config::SessionConfig;
use crate::confidential::{ConfidentialView, DisplayText};
use crate::dialog::{Dialog, SessionResult};
use crate::key_grid::{KeyGrid, Slot};
use crate::repeat::RepeatTimer;
use crate::selection::SelectionModel;
use crate::text_buffer::{CaretDirection, TextBuffer};

/// How an action reached the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Press,
    Repeat,
}

/// Read-only view for the render layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState<'a> {
    pub selection: usize,
    pub slot: Slot,
    pub key_set: usize,
    pub content: &'a str,
    /// Caret byte offset into `content`.
    pub caret: usize,
    /// Masked text, present only in confidential mode.
    pub display: Option<DisplayText>,
    pub message: Option<&'a str>,
    pub grid: &'a KeyGrid,
    pub result: &'a SessionResult,
}

impl KeyboardState<'_> {
    /// Text and caret the field should show: masked when confidential.
    #[must_use]
    pub fn field(&self) -> (&str, usize) {
        match &self.display {
            Some(display) => (display.text.as_str(), display.caret),
            None => (self.content, self.caret),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeyboardController {
    grid: KeyGrid,
    selection: SelectionModel,
    buffer: TextBuffer,
    confidential: Option<ConfidentialView>,
    repeat: RepeatTimer,
    /// Action the repeat timer is currently counting for.
    repeating: Option<Action>,
    key_set: usize,
    now: u64,
    wrap_on_press: bool,
    wrap_on_repeat: bool,
    caret_pinned: bool,
    message: Option<String>,
    result: SessionResult,
}

impl KeyboardController {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let buffer = TextBuffer::new(config.initial_text);
        let confidential = config.confidential.then(|| {
            let mut view = ConfidentialView::new(config.mask, config.reveal_window);
            view.load_initial(buffer.char_count(), 0, config.reveal_initial_text);
            view
        });
        tracing::debug!(
            confidential = confidential.is_some(),
            initial_len = buffer.len(),
            key_sets = config.grid.key_set_count(),
            "keyboard session started"
        );
        Self {
            selection: SelectionModel::new(config.grid.geometry()),
            grid: config.grid,
            buffer,
            confidential,
            repeat: RepeatTimer::new(config.repeat),
            repeating: None,
            key_set: 0,
            now: 0,
            wrap_on_press: config.wrap_on_press,
            wrap_on_repeat: config.wrap_on_repeat,
            caret_pinned: false,
            message: config.message,
            result: SessionResult::Pending,
        }
    }

    /// Handle a discrete press. Returns `true` when a redraw is needed.
    pub fn process_action(&mut self, action: Action) -> bool {
        if self.result.is_terminal() {
            tracing::trace!(%action, "session finished, action ignored");
            return false;
        }
        self.repeat.reset();
        self.repeating = Some(action);
        self.dispatch(action, Trigger::Press)
    }

    /// Advance one frame. `held` is the action whose key is still down.
    ///
    /// Returns `true` when a redraw is needed: a repeat was handled or a
    /// confidential character just got masked.
    pub fn tick(&mut self, held: Option<Action>) -> bool {
        if self.result.is_terminal() {
            return false;
        }
        self.now += 1;
        let mut redraw = self
            .confidential
            .as_ref()
            .is_some_and(|view| view.expires_at(self.now));

        let Some(action) = held.filter(|action| action.is_repeatable()) else {
            self.repeat.tick(false);
            self.caret_pinned = false;
            return redraw;
        };

        if self.repeating != Some(action) {
            self.repeat.reset();
            self.repeating = Some(action);
        }
        if self.repeat.tick(true) {
            let handled = self.dispatch(action, Trigger::Repeat);
            self.caret_pinned = !action.is_navigation() && handled;
            redraw |= handled;
        }
        redraw
    }

    fn dispatch(&mut self, action: Action, trigger: Trigger) -> bool {
        let wrap = match trigger {
            Trigger::Press => self.wrap_on_press,
            Trigger::Repeat => self.wrap_on_repeat,
        };
        match action {
            Action::Up => self.selection.move_up(wrap),
            Action::Down => self.selection.move_down(wrap),
            Action::Left => self.selection.move_left(wrap),
            Action::Right => self.selection.move_right(wrap),
            Action::JumpRowStart => self.selection.jump_row_start(),
            Action::JumpRowEnd => self.selection.jump_row_end(),
            Action::Confirm => self.confirm(trigger),
            Action::Cancel => self.finish(SessionResult::Cancelled),
            Action::Submit => self.commit(),
            Action::Backspace => self.backspace(),
            Action::Space => self.type_unit(" "),
            Action::SwitchKeySet => self.switch_key_set(),
            Action::CaretLeft => self.buffer.move_caret(CaretDirection::Left),
            Action::CaretRight => self.buffer.move_caret(CaretDirection::Right),
        }
    }

    fn confirm(&mut self, trigger: Trigger) -> bool {
        let index = self.selection.index();
        match self.selection.slot() {
            Slot::Key(key) if key == self.grid.backspace_index() => self.backspace(),
            Slot::Cancel | Slot::Ok if trigger == Trigger::Repeat => self.type_key(index),
            Slot::Key(key) => self.type_key(key),
            Slot::Cancel => self.finish(SessionResult::Cancelled),
            Slot::Ok => self.commit(),
        }
    }

    fn type_key(&mut self, index: usize) -> bool {
        let char_index = self.buffer.caret_char_index();
        match self.buffer.insert_key(&self.grid, self.key_set, index) {
            Ok(_) => {
                if let Some(view) = self.confidential.as_mut() {
                    view.record_insert(char_index, 1, self.now);
                }
                true
            }
            Err(err) => {
                tracing::warn!(%err, key_set = self.key_set, "key not typed");
                false
            }
        }
    }

    fn type_unit(&mut self, unit: &str) -> bool {
        let char_index = self.buffer.caret_char_index();
        self.buffer.insert_at_caret(unit);
        if let Some(view) = self.confidential.as_mut() {
            view.record_insert(char_index, unit.chars().count(), self.now);
        }
        true
    }

    fn backspace(&mut self) -> bool {
        let Some(removed) = self.buffer.delete_before_caret() else {
            return false;
        };
        if let Some(view) = self.confidential.as_mut() {
            view.record_delete(removed.char_index, 1);
        }
        true
    }

    fn switch_key_set(&mut self) -> bool {
        self.key_set = (self.key_set + 1) % self.grid.key_set_count();
        tracing::debug!(key_set = self.key_set, "key-set switched");
        true
    }

    fn commit(&mut self) -> bool {
        let text = self.buffer.content().to_string();
        self.finish(SessionResult::Committed(text))
    }

    fn finish(&mut self, result: SessionResult) -> bool {
        tracing::info!(
            committed = matches!(result, SessionResult::Committed(_)),
            len = self.buffer.len(),
            "keyboard session finished"
        );
        self.result = result;
        self.repeat.reset();
        self.repeating = None;
        true
    }

    #[must_use]
    pub fn state(&self) -> KeyboardState<'_> {
        KeyboardState {
            selection: self.selection.index(),
            slot: self.selection.slot(),
            key_set: self.key_set,
            content: self.buffer.content(),
            caret: self.buffer.caret(),
            display: self.display(),
            message: self.message.as_deref(),
            grid: &self.grid,
            result: &self.result,
        }
    }

    /// Masked field text at the current tick, in confidential mode.
    #[must_use]
    pub fn display(&self) -> Option<DisplayText> {
        self.confidential.as_ref().map(|view| {
            view.compute_display(self.buffer.content(), self.buffer.caret(), self.now)
        })
    }

    /// Place the selection directly, e.g. to restore a previous position.
    pub fn select(&mut self, index: usize) -> crate::error::Result<()> {
        self.selection.select(index)
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn grid(&self) -> &KeyGrid {
        &self.grid
    }

    #[must_use]
    pub fn key_set(&self) -> usize {
        self.key_set
    }

    /// Ticks elapsed since the session started.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    #[must_use]
    pub fn is_confidential(&self) -> bool {
        self.confidential.is_some()
    }

    #[must_use]
    pub fn result(&self) -> &SessionResult {
        &self.result
    }

    #[must_use]
    pub fn caret_pinned(&self) -> bool {
        self.caret_pinned
    }
}

impl Dialog for KeyboardController {
    type State<'a> = KeyboardState<'a>;

    fn process_action(&mut self, action: Action) -> bool {
        KeyboardController::process_action(self, action)
    }

    fn tick(&mut self, held: Option<Action>) -> bool {
        KeyboardController::tick(self, held)
    }

    fn observe(&self) -> KeyboardState<'_> {
        self.state()
    }

    fn result(&self) -> &SessionResult {
        &self.result
    }

    fn caret_pinned(&self) -> bool {
        self.caret_pinned
    }
}
