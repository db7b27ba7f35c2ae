#![forbid(unsafe_code)]

//! Masked projection of the input buffer for password entry.
//!
//! Each character carries a reveal deadline measured in ticks. A freshly
//! typed character shows in clear until its deadline passes, then renders
//! as the mask glyph. The view never owns the text; it is recomputed from
//! the buffer on demand, so the buffer's caret arithmetic is untouched.

/// Bullet used in place of hidden characters.
pub const DEFAULT_MASK: char = '•';

/// Ticks a typed character stays readable (about one second at 33ms).
pub const DEFAULT_REVEAL_TICKS: u64 = 30;

/// Display string plus the caret translated into its byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub text: String,
    pub caret: usize,
}

/// Per-character reveal deadlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidentialView {
    mask: char,
    reveal_window: u64,
    deadlines: Vec<u64>,
}

impl Default for ConfidentialView {
    fn default() -> Self {
        Self::new(DEFAULT_MASK, DEFAULT_REVEAL_TICKS)
    }
}

impl ConfidentialView {
    #[must_use]
    pub fn new(mask: char, reveal_window: u64) -> Self {
        Self {
            mask,
            reveal_window,
            deadlines: Vec::new(),
        }
    }

    /// Track text that exists before the first keystroke.
    ///
    /// Unless `reveal` is set it is masked from the first frame on.
    pub fn load_initial(&mut self, char_count: usize, now: u64, reveal: bool) {
        let deadline = if reveal {
            now.saturating_add(self.reveal_window)
        } else {
            now
        };
        self.deadlines = vec![deadline; char_count];
    }

    /// Record `count` characters inserted at `char_index`.
    ///
    /// Deadlines at or after the insertion point shift right with the text.
    pub fn record_insert(&mut self, char_index: usize, count: usize, now: u64) {
        let at = char_index.min(self.deadlines.len());
        let deadline = now.saturating_add(self.reveal_window);
        self.deadlines
            .splice(at..at, std::iter::repeat_n(deadline, count));
    }

    /// Drop the deadlines of `count` characters removed at `char_index`.
    pub fn record_delete(&mut self, char_index: usize, count: usize) {
        let start = char_index.min(self.deadlines.len());
        let end = (char_index + count).min(self.deadlines.len());
        self.deadlines.drain(start..end);
    }

    /// Whether character `index` is still inside its reveal window.
    #[must_use]
    pub fn is_revealed(&self, index: usize, now: u64) -> bool {
        self.deadlines.get(index).is_some_and(|&deadline| now < deadline)
    }

    /// Whether some character leaves its reveal window exactly at `now`.
    #[must_use]
    pub fn expires_at(&self, now: u64) -> bool {
        self.deadlines.contains(&now)
    }

    #[must_use]
    pub fn mask(&self) -> char {
        self.mask
    }

    #[must_use]
    pub fn reveal_window(&self) -> u64 {
        self.reveal_window
    }

    #[must_use]
    pub fn tracked(&self) -> usize {
        self.deadlines.len()
    }

    /// Render `content` with expired characters masked.
    ///
    /// `caret` is a byte offset into `content`; the returned caret points to
    /// the same character boundary inside the display string. Characters
    /// without a recorded deadline are masked.
    #[must_use]
    pub fn compute_display(&self, content: &str, caret: usize, now: u64) -> DisplayText {
        let mut text = String::with_capacity(content.len());
        let mut display_caret = None;
        for (index, (offset, ch)) in content.char_indices().enumerate() {
            if offset == caret {
                display_caret = Some(text.len());
            }
            if self.is_revealed(index, now) {
                text.push(ch);
            } else {
                text.push(self.mask);
            }
        }
        let caret = display_caret.unwrap_or(text.len());
        DisplayText { text, caret }
    }
}
