#![forbid(unsafe_code)]

//! Core: key grid, selection, caret editing, key repeat and masking.
//!
//! # Role in vkb
//! `vkb-core` is the input-method state machine of the virtual keyboard. It
//! owns no window, clock or device; every input arrives as an [`Action`] and
//! every frame as a call to [`KeyboardController::tick`].
//!
//! # Primary responsibilities
//! - **KeyGrid**: rows × columns of keys per key-set, plus Cancel and OK.
//! - **SelectionModel**: arrow navigation with wraparound and row memory.
//! - **TextBuffer**: UTF-8 aware caret insertion and deletion.
//! - **RepeatTimer**: held-key auto-repeat after an initial delay.
//! - **ConfidentialView**: per-character reveal window for passwords.
//!
//! # How it fits in the system
//! The runtime (`vkb-runtime`) pumps actions from a source into any
//! [`Dialog`] and hands [`Dialog::observe`] to a frontend each frame. The
//! `vkb` binary wires a source, a frontend and the host output contract.
//!
//! # Example
//!
//! ```
//! use vkb_core::{Action, KeyboardController, SessionConfig, SessionResult};
//!
//! let mut kb = KeyboardController::new(SessionConfig::default());
//! kb.process_action(Action::Confirm);
//! kb.process_action(Action::Submit);
//! assert_eq!(kb.result(), &SessionResult::Committed("1".to_string()));
//! ```

pub mod action;
pub mod confidential;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod key_grid;
pub mod repeat;
pub mod selection;
pub mod text_buffer;
pub mod utf8;

pub use action::Action;
pub use confidential::{ConfidentialView, DisplayText};
pub use config::SessionConfig;
pub use controller::{KeyboardController, KeyboardState};
pub use dialog::{Dialog, SessionResult};
pub use error::{Result, VkbError};
pub use key_grid::{GridGeometry, KeyGrid, KeyGridSpec, KeySet, Slot};
pub use repeat::{RepeatConfig, RepeatTimer};
pub use selection::{Move, SelectionModel};
pub use text_buffer::{CaretDirection, Removed, TextBuffer};
