#![forbid(unsafe_code)]

//! Action scripts for headless sessions.
//!
//! # Syntax
//!
//! Tokens are separated by whitespace; `#` comments out the rest of a line.
//!
//! | Token       | Frames | Meaning |
//! |-------------|--------|---------|
//! | `name`      | 1      | Press and release within one frame |
//! | `name*N`    | N      | Press, hold through N ticks, release |
//! | `wait N`    | N      | Idle frames |
//! | `quit`      | 1      | Host quit request |
//!
//! Action names are the kebab-case names of [`Action`], e.g. `confirm`,
//! `switch-key-set`, `caret-left`. The script ending is a quit.
//!
//! ```
//! use vkb_runtime::script::ScriptSource;
//!
//! let source = ScriptSource::parse("down right*8 # hold\nconfirm submit").unwrap();
//! assert_eq!(source.remaining(), 11);
//! ```

use vkb_core::Action;

use crate::source::{ActionSource, FrameQueue, InputEvent};

/// Upper bound for `*N` and `wait N`, to keep a typo from stalling a run.
pub const MAX_FRAMES_PER_TOKEN: usize = 10_000;

/// Script parse failure, with the 1-based line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// A parsed script, replayed one frame per poll.
#[derive(Debug, Clone, Default)]
pub struct ScriptSource {
    frames: FrameQueue,
}

impl ScriptSource {
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut builder = Builder::default();
        for (line_no, line) in script.lines().enumerate() {
            let line_no = line_no + 1;
            let code = line.split_once('#').map_or(line, |(code, _)| code);
            let mut tokens = code.split_whitespace();
            while let Some(token) = tokens.next() {
                if token.eq_ignore_ascii_case("wait") {
                    let count = tokens
                        .next()
                        .ok_or_else(|| ScriptError::new(line_no, "`wait` needs a frame count"))?;
                    builder.idle(parse_count(count, line_no)?);
                } else if token.eq_ignore_ascii_case("quit") {
                    builder.frame(vec![InputEvent::Quit]);
                } else if let Some((name, count)) = token.split_once('*') {
                    let action = parse_action(name, line_no)?;
                    builder.hold(action, parse_count(count, line_no)?);
                } else {
                    let action = parse_action(token, line_no)?;
                    builder.frame(vec![InputEvent::Press(action), InputEvent::Release(action)]);
                }
            }
        }
        let frames = builder.finish();
        tracing::debug!(frames = frames.len(), "action script parsed");
        Ok(Self { frames })
    }

    /// Frames left to replay.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl ActionSource for ScriptSource {
    fn next_frame(&mut self) -> Option<Vec<InputEvent>> {
        self.frames.next_frame()
    }
}

fn parse_action(name: &str, line: usize) -> Result<Action, ScriptError> {
    name.parse::<Action>()
        .map_err(|err| ScriptError::new(line, err.to_string()))
}

fn parse_count(text: &str, line: usize) -> Result<usize, ScriptError> {
    let count = text
        .parse::<usize>()
        .map_err(|_| ScriptError::new(line, format!("invalid frame count {text:?}")))?;
    if !(1..=MAX_FRAMES_PER_TOKEN).contains(&count) {
        return Err(ScriptError::new(
            line,
            format!("frame count {count} outside 1..={MAX_FRAMES_PER_TOKEN}"),
        ));
    }
    Ok(count)
}

/// Accumulates frames. A hold's release is carried into the frame after
/// its last held tick.
#[derive(Default)]
struct Builder {
    frames: FrameQueue,
    pending_release: Option<Action>,
}

impl Builder {
    fn frame(&mut self, mut events: Vec<InputEvent>) {
        if let Some(action) = self.pending_release.take() {
            events.insert(0, InputEvent::Release(action));
        }
        self.frames.push(events);
    }

    fn idle(&mut self, count: usize) {
        for _ in 0..count {
            self.frame(Vec::new());
        }
    }

    fn hold(&mut self, action: Action, ticks: usize) {
        self.frame(vec![InputEvent::Press(action)]);
        self.frames.push_idle(ticks.saturating_sub(1));
        self.pending_release = Some(action);
    }

    fn finish(mut self) -> FrameQueue {
        if let Some(action) = self.pending_release.take() {
            self.frames.push(vec![InputEvent::Release(action)]);
        }
        self.frames
    }
}
