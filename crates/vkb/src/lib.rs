#![forbid(unsafe_code)]

//! Command line host for the virtual keyboard.
//!
//! Reads logical actions from a script, runs a keyboard session through the
//! `vkb-runtime` event pump and reports the result the way launcher scripts
//! expect: the committed text on stdout between `[VKStart]` and `[VKEnd]`
//! with exit status 0, or nothing on stdout and a non-zero status.

pub mod cli;
pub mod error;
pub mod layout;
pub mod logging;

pub use cli::{Cli, Outcome, run, run_from_env, run_script};
pub use error::{CliError, Result};
