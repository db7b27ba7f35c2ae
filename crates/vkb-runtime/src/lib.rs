#![forbid(unsafe_code)]

//! Runtime: the frame loop that drives a [`Dialog`](vkb_core::Dialog).
//!
//! # Role in vkb
//! `vkb-runtime` sits between an input device and the pure state machine in
//! `vkb-core`. It polls an [`ActionSource`] once per frame, tracks the held
//! action for auto-repeat, runs the caret blink ticker on its own thread and
//! hands each frame to a [`Frontend`].
//!
//! # Primary responsibilities
//! - **Program**: the frame-paced event pump.
//! - **ActionSource**: frame queues, channels and action scripts.
//! - **CaretBlink**: background visibility toggle with pinning.
//! - **snapshot**: plain-text rendering for dumps and tests.

pub mod caret;
pub mod program;
pub mod script;
pub mod snapshot;
pub mod source;

pub use caret::CaretBlink;
pub use program::{FrameInfo, Frontend, NoFrontend, Program, ProgramConfig};
pub use script::{ScriptError, ScriptSource};
pub use snapshot::render_text;
pub use source::{ActionSource, FrameQueue, InputEvent};
