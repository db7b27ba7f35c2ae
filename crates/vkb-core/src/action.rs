#![forbid(unsafe_code)]

//! Logical input actions.
//!
//! The input layer maps keys, gamepad buttons, hats and axes onto these
//! actions before anything reaches the controller. The controller never
//! sees a raw device event.

use std::fmt;
use std::str::FromStr;

use crate::error::VkbError;

/// A normalized input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    /// Activate the selected slot: type its key, delete on the backspace
    /// cell, or finish the session on Cancel/OK.
    Confirm,
    /// Abandon the session.
    Cancel,
    Backspace,
    Space,
    SwitchKeySet,
    CaretLeft,
    CaretRight,
    JumpRowStart,
    JumpRowEnd,
    /// Commit the text regardless of the selection.
    Submit,
}

impl Action {
    pub const ALL: [Action; 14] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Confirm,
        Action::Cancel,
        Action::Backspace,
        Action::Space,
        Action::SwitchKeySet,
        Action::CaretLeft,
        Action::CaretRight,
        Action::JumpRowStart,
        Action::JumpRowEnd,
        Action::Submit,
    ];

    /// Kebab-case name used in action scripts and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Backspace => "backspace",
            Self::Space => "space",
            Self::SwitchKeySet => "switch-key-set",
            Self::CaretLeft => "caret-left",
            Self::CaretRight => "caret-right",
            Self::JumpRowStart => "jump-row-start",
            Self::JumpRowEnd => "jump-row-end",
            Self::Submit => "submit",
        }
    }

    /// Whether holding the action auto-repeats it.
    #[must_use]
    pub const fn is_repeatable(self) -> bool {
        matches!(
            self,
            Self::Up
                | Self::Down
                | Self::Left
                | Self::Right
                | Self::Confirm
                | Self::Backspace
                | Self::Space
                | Self::CaretLeft
                | Self::CaretRight
        )
    }

    /// Whether the action moves the grid selection.
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::Up
                | Self::Down
                | Self::Left
                | Self::Right
                | Self::JumpRowStart
                | Self::JumpRowEnd
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = VkbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|action| action.name() == normalized)
            .ok_or_else(|| VkbError::UnknownAction {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn parse_is_lenient_about_case_and_underscores() {
        assert_eq!("Switch_Key_Set".parse::<Action>(), Ok(Action::SwitchKeySet));
        assert_eq!(" CARET-left ".parse::<Action>(), Ok(Action::CaretLeft));
        assert!("ok".parse::<Action>().is_err());
    }

    #[test]
    fn unknown_name_is_reported() {
        assert_eq!(
            "jump".parse::<Action>(),
            Err(VkbError::UnknownAction {
                name: "jump".to_string()
            })
        );
    }

    #[test]
    fn session_enders_do_not_repeat() {
        for action in [
            Action::Cancel,
            Action::Submit,
            Action::SwitchKeySet,
            Action::JumpRowStart,
            Action::JumpRowEnd,
        ] {
            assert!(!action.is_repeatable(), "{action}");
        }
        assert!(Action::Confirm.is_repeatable());
        assert!(Action::CaretRight.is_repeatable());
    }
}
