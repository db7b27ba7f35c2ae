#![forbid(unsafe_code)]

//! Session configuration.
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `VKB_REVEAL_TICKS` | u64 | 30 | Ticks a typed character stays readable in confidential mode |
//! | `VKB_NO_WRAP` | bool | false | Disable wraparound for presses and repeats |
//! | `VKB_REPEAT_INITIAL_TICKS` | u32 | 6 | See [`RepeatConfig`] |
//! | `VKB_REPEAT_STEADY_TICKS` | u32 | 2 | See [`RepeatConfig`] |

use crate::confidential::{DEFAULT_MASK, DEFAULT_REVEAL_TICKS};
use crate::key_grid::KeyGrid;
use crate::repeat::RepeatConfig;

/// Everything a session needs at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Text present when the keyboard opens; the caret starts at its end.
    pub initial_text: String,
    /// Mask the text as it is typed.
    pub confidential: bool,
    /// Ticks a freshly typed character stays readable.
    pub reveal_window: u64,
    pub mask: char,
    /// Show the initial text in clear for one reveal window instead of
    /// masking it from the start.
    pub reveal_initial_text: bool,
    /// Prompt shown above the keyboard.
    pub message: Option<String>,
    /// Allow wraparound on discrete presses.
    pub wrap_on_press: bool,
    /// Allow wraparound on held-key repeats.
    pub wrap_on_repeat: bool,
    pub repeat: RepeatConfig,
    pub grid: KeyGrid,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_text: String::new(),
            confidential: false,
            reveal_window: DEFAULT_REVEAL_TICKS,
            mask: DEFAULT_MASK,
            reveal_initial_text: false,
            message: None,
            wrap_on_press: true,
            wrap_on_repeat: true,
            repeat: RepeatConfig::default(),
            grid: KeyGrid::default(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = text.into();
        self
    }

    #[must_use]
    pub fn confidential(mut self, enabled: bool) -> Self {
        self.confidential = enabled;
        self
    }

    #[must_use]
    pub fn with_reveal_window(mut self, ticks: u64) -> Self {
        self.reveal_window = ticks;
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn reveal_initial_text(mut self, reveal: bool) -> Self {
        self.reveal_initial_text = reveal;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_wrap(mut self, on_press: bool, on_repeat: bool) -> Self {
        self.wrap_on_press = on_press;
        self.wrap_on_repeat = on_repeat;
        self
    }

    #[must_use]
    pub fn with_repeat(mut self, repeat: RepeatConfig) -> Self {
        self.repeat = repeat;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: KeyGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Defaults overridden by `VKB_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self {
            repeat: RepeatConfig::from_env(),
            ..Self::default()
        };

        if let Ok(val) = std::env::var("VKB_REVEAL_TICKS")
            && let Ok(ticks) = val.parse::<u64>()
        {
            config.reveal_window = ticks;
        }

        if let Ok(val) = std::env::var("VKB_NO_WRAP")
            && (val == "1" || val.eq_ignore_ascii_case("true"))
        {
            config.wrap_on_press = false;
            config.wrap_on_repeat = false;
        }

        config
    }
}
