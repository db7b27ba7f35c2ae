#![forbid(unsafe_code)]

//! Held-key auto-repeat.
//!
//! The event source delivers one discrete press per key-down. While the key
//! stays down the owner samples "held" once per frame tick, and
//! [`RepeatTimer`] turns that sampling into repeat fires: nothing during an
//! initial delay, then one fire every steady interval.
//!
//! # State Machine
//!
//! ```text
//!            held, remaining == 0
//!   ┌──────┐ ──────────────────────▶ ┌────────────────────┐
//!   │ Idle │                         │ Counting(remaining) │──┐ held: remaining -= 1
//!   └──────┘ ◀────────────────────── └────────────────────┘◀─┘
//!                not held                    │ reaches 0
//!                                            ▼
//!                                   fire, remaining = steady
//! ```
//!
//! The first press is never reported by the timer; it was already handled
//! as a discrete event.
//!
//! # Example
//!
//! ```
//! use vkb_core::repeat::{RepeatConfig, RepeatTimer};
//!
//! let mut timer = RepeatTimer::new(RepeatConfig::default());
//! // Arming tick, then five more quiet ticks of the initial delay.
//! let fires: Vec<bool> = (0..9).map(|_| timer.tick(true)).collect();
//! assert_eq!(
//!     fires,
//!     [false, false, false, false, false, false, true, false, true]
//! );
//! ```

/// Default number of ticks between the press and the first repeat.
pub const DEFAULT_INITIAL_DELAY_TICKS: u32 = 6;

/// Default number of ticks between subsequent repeats.
pub const DEFAULT_STEADY_DELAY_TICKS: u32 = 2;

/// Smallest accepted delay. A zero delay would re-arm into the idle state.
pub const MIN_DELAY_TICKS: u32 = 1;

/// Largest accepted delay (about eight seconds at 33ms frames).
pub const MAX_DELAY_TICKS: u32 = 240;

/// Repeat thresholds.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `VKB_REPEAT_INITIAL_TICKS` | u32 | 6 | Ticks before the first repeat |
/// | `VKB_REPEAT_STEADY_TICKS` | u32 | 2 | Ticks between repeats |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatConfig {
    pub initial_delay_ticks: u32,
    pub steady_delay_ticks: u32,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            initial_delay_ticks: DEFAULT_INITIAL_DELAY_TICKS,
            steady_delay_ticks: DEFAULT_STEADY_DELAY_TICKS,
        }
    }
}

impl RepeatConfig {
    #[must_use]
    pub fn with_initial_delay(mut self, ticks: u32) -> Self {
        self.initial_delay_ticks = ticks;
        self
    }

    #[must_use]
    pub fn with_steady_delay(mut self, ticks: u32) -> Self {
        self.steady_delay_ticks = ticks;
        self
    }

    /// Load thresholds from the environment, falling back to defaults.
    ///
    /// Values are clamped with [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("VKB_REPEAT_INITIAL_TICKS")
            && let Ok(ticks) = val.parse::<u32>()
        {
            config.initial_delay_ticks = ticks;
        }

        if let Ok(val) = std::env::var("VKB_REPEAT_STEADY_TICKS")
            && let Ok(ticks) = val.parse::<u32>()
        {
            config.steady_delay_ticks = ticks;
        }

        config.validated()
    }

    /// Clamp both delays to `MIN_DELAY_TICKS..=MAX_DELAY_TICKS`.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.initial_delay_ticks = self
            .initial_delay_ticks
            .clamp(MIN_DELAY_TICKS, MAX_DELAY_TICKS);
        self.steady_delay_ticks = self
            .steady_delay_ticks
            .clamp(MIN_DELAY_TICKS, MAX_DELAY_TICKS);
        self
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        let range = MIN_DELAY_TICKS..=MAX_DELAY_TICKS;
        range.contains(&self.initial_delay_ticks) && range.contains(&self.steady_delay_ticks)
    }
}

/// Per-control debounce counter.
///
/// `remaining == 0` means idle: not counting and ready to arm.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    config: RepeatConfig,
    remaining: u32,
}

impl RepeatTimer {
    #[must_use]
    pub fn new(config: RepeatConfig) -> Self {
        Self {
            config: config.validated(),
            remaining: 0,
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RepeatConfig::default())
    }

    /// Sample the held state for one tick. Returns `true` when a repeat fires.
    pub fn tick(&mut self, held: bool) -> bool {
        if !held {
            self.remaining = 0;
            return false;
        }

        if self.remaining == 0 {
            self.remaining = self.config.initial_delay_ticks;
            return false;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.config.steady_delay_ticks;
            true
        } else {
            false
        }
    }

    /// Drop any countdown in progress.
    pub fn reset(&mut self) {
        self.remaining = 0;
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.remaining == 0
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn config(&self) -> &RepeatConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_ticks(timer: &mut RepeatTimer, ticks: usize) -> Vec<usize> {
        (0..ticks).filter(|_| timer.tick(true)).collect()
    }

    #[test]
    fn release_keeps_timer_idle() {
        let mut timer = RepeatTimer::with_defaults();
        assert!(!timer.tick(false));
        assert!(timer.is_idle());
    }

    #[test]
    fn first_held_tick_arms_without_firing() {
        let mut timer = RepeatTimer::with_defaults();
        assert!(!timer.tick(true));
        assert_eq!(timer.remaining(), DEFAULT_INITIAL_DELAY_TICKS);
    }

    #[test]
    fn fires_after_initial_delay_then_at_steady_rate() {
        let mut timer = RepeatTimer::with_defaults();
        // Tick 0 arms; 6 decrements later (tick 6) the first fire.
        assert_eq!(fire_ticks(&mut timer, 13), vec![6, 8, 10, 12]);
    }

    #[test]
    fn release_mid_countdown_resets() {
        let mut timer = RepeatTimer::with_defaults();
        for _ in 0..4 {
            timer.tick(true);
        }
        assert!(!timer.tick(false));
        assert!(timer.is_idle());
        // Starts over with the full initial delay.
        assert_eq!(fire_ticks(&mut timer, 7), vec![6]);
    }

    #[test]
    fn custom_thresholds() {
        let config = RepeatConfig::default()
            .with_initial_delay(3)
            .with_steady_delay(1);
        let mut timer = RepeatTimer::new(config);
        assert_eq!(fire_ticks(&mut timer, 7), vec![3, 4, 5, 6]);
    }

    #[test]
    fn zero_delay_is_clamped() {
        let config = RepeatConfig::default().with_steady_delay(0);
        assert!(!config.is_valid());
        let validated = config.validated();
        assert_eq!(validated.steady_delay_ticks, MIN_DELAY_TICKS);
        assert!(validated.is_valid());
    }

    #[test]
    fn oversized_delay_is_clamped() {
        let config = RepeatConfig::default().with_initial_delay(10_000).validated();
        assert_eq!(config.initial_delay_ticks, MAX_DELAY_TICKS);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut timer = RepeatTimer::with_defaults();
        timer.tick(true);
        timer.reset();
        assert!(timer.is_idle());
    }
}
