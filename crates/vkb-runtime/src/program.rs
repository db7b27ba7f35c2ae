#![forbid(unsafe_code)]

//! Frame-paced event pump.
//!
//! [`Program`] owns a [`Dialog`] and an [`ActionSource`] and drives them one
//! frame at a time until the dialog reaches a terminal result or the source
//! runs dry:
//!
//! 1. Drain the frame's events. A press goes to
//!    [`Dialog::process_action`] and becomes the held action; a release of
//!    that action clears it.
//! 2. Stop if the dialog finished. A quit request or an exhausted source
//!    ends the session as cancelled.
//! 3. [`Dialog::tick`] once with the held action.
//! 4. Publish the caret pin state, hand the frame to the [`Frontend`].
//! 5. Sleep out the rest of the frame interval when paced.
//!
//! # Example
//!
//! ```
//! use vkb_core::{KeyboardController, SessionConfig, SessionResult};
//! use vkb_runtime::program::{Program, ProgramConfig};
//! use vkb_runtime::script::ScriptSource;
//!
//! let source = ScriptSource::parse("right confirm submit").unwrap();
//! let dialog = KeyboardController::new(SessionConfig::default());
//! let mut program = Program::new(dialog, source, ProgramConfig::headless());
//! assert_eq!(
//!     program.run().unwrap(),
//!     SessionResult::Committed("2".to_string())
//! );
//! ```

use std::io;
use std::time::Duration;

use vkb_core::{Action, Dialog, SessionResult};
use web_time::Instant;

use crate::caret::{CaretBlink, DEFAULT_BLINK_PERIOD};
use crate::source::{ActionSource, InputEvent};

/// Frame period (about 30 fps).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Configuration for the event pump.
///
/// # Environment Variables
///
/// | Variable | Type | Default | Description |
/// |----------|------|---------|-------------|
/// | `VKB_FRAME_MS` | u64 | 33 | Frame interval in milliseconds |
/// | `VKB_MAX_FRAMES` | u64 | unset | Cancel the session after this many frames |
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Time budget of one frame.
    pub frame_interval: Duration,
    /// Sleep out the rest of each frame. Off for scripted runs and tests.
    pub paced: bool,
    /// Cancel after this many frames.
    pub max_frames: Option<u64>,
    /// Blink period of the caret; `None` keeps it always visible and
    /// spawns no thread.
    pub caret_blink: Option<Duration>,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            paced: true,
            max_frames: None,
            caret_blink: Some(DEFAULT_BLINK_PERIOD),
        }
    }
}

impl ProgramConfig {
    /// Unpaced, no blink thread: frames run back to back.
    #[must_use]
    pub fn headless() -> Self {
        Self {
            paced: false,
            caret_blink: None,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    #[must_use]
    pub fn with_paced(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    #[must_use]
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    #[must_use]
    pub fn with_caret_blink(mut self, period: Option<Duration>) -> Self {
        self.caret_blink = period;
        self
    }

    /// Apply `VKB_FRAME_MS` and `VKB_MAX_FRAMES` on top of `self`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("VKB_FRAME_MS")
            && let Ok(ms) = val.parse::<u64>()
            && ms > 0
        {
            self.frame_interval = Duration::from_millis(ms);
        }

        if let Ok(val) = std::env::var("VKB_MAX_FRAMES")
            && let Ok(frames) = val.parse::<u64>()
        {
            self.max_frames = Some(frames);
        }

        self
    }
}

/// Per-frame facts the frontend needs besides the dialog state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub index: u64,
    pub show_caret: bool,
    /// The dialog reported a visible change since the last rendered frame.
    pub dirty: bool,
}

/// Render callback.
pub trait Frontend<D: Dialog> {
    fn render(&mut self, info: FrameInfo, state: D::State<'_>);
}

/// Frontend that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFrontend;

impl<D: Dialog> Frontend<D> for NoFrontend {
    fn render(&mut self, _info: FrameInfo, _state: D::State<'_>) {}
}

/// The event pump.
pub struct Program<D: Dialog, S: ActionSource> {
    dialog: D,
    source: S,
    config: ProgramConfig,
    held: Option<Action>,
    frame: u64,
}

impl<D: Dialog, S: ActionSource> Program<D, S> {
    pub fn new(dialog: D, source: S, config: ProgramConfig) -> Self {
        Self {
            dialog,
            source,
            config,
            held: None,
            frame: 0,
        }
    }

    /// Run without rendering.
    pub fn run(&mut self) -> io::Result<SessionResult> {
        self.run_with(&mut NoFrontend)
    }

    /// Run the loop, rendering every frame through `frontend`.
    ///
    /// Fails only if the caret blink thread cannot be spawned.
    pub fn run_with<F: Frontend<D>>(&mut self, frontend: &mut F) -> io::Result<SessionResult> {
        let blink = self.config.caret_blink.map(CaretBlink::start).transpose()?;
        let mut dirty = true;

        let result = loop {
            if let Some(max) = self.config.max_frames
                && self.frame >= max
            {
                tracing::info!(frames = self.frame, "frame limit reached");
                break SessionResult::Cancelled;
            }

            let started = Instant::now();
            let span = tracing::debug_span!("vkb.frame", frame = self.frame);
            let _guard = span.enter();

            let Some(events) = self.source.next_frame() else {
                tracing::debug!("action source exhausted");
                break SessionResult::Cancelled;
            };

            let mut quit = false;
            for event in events {
                match event {
                    InputEvent::Press(action) => {
                        dirty |= self.dialog.process_action(action);
                        self.held = Some(action);
                    }
                    InputEvent::Release(action) => {
                        if self.held == Some(action) {
                            self.held = None;
                        }
                    }
                    InputEvent::Quit => quit = true,
                }
                if quit || self.dialog.result().is_terminal() {
                    break;
                }
            }

            if self.dialog.result().is_terminal() {
                break self.dialog.result().clone();
            }
            if quit {
                tracing::debug!("quit requested");
                break SessionResult::Cancelled;
            }

            dirty |= self.dialog.tick(self.held);

            let show_caret = match &blink {
                Some(blink) => {
                    blink.set_pinned(self.dialog.caret_pinned());
                    blink.show_caret()
                }
                None => true,
            };
            let info = FrameInfo {
                index: self.frame,
                show_caret,
                dirty,
            };
            frontend.render(info, self.dialog.observe());
            dirty = false;
            self.frame += 1;

            if self.config.paced {
                let elapsed = started.elapsed();
                if let Some(rest) = self.config.frame_interval.checked_sub(elapsed) {
                    std::thread::sleep(rest);
                }
            }
        };

        if let Some(blink) = blink {
            blink.stop();
        }
        self.held = None;
        Ok(result)
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    pub fn into_dialog(self) -> D {
        self.dialog
    }
}
