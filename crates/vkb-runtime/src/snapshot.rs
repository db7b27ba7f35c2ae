#![forbid(unsafe_code)]

//! Plain-text rendering of the keyboard state.
//!
//! Used by the `--dump` flag of the host and by golden-style tests. The
//! layout mirrors the on-screen keyboard:
//!
//! ```text
//! Enter Wi-Fi password
//! > ab|
//! +-------------------------------------------------------+
//!  [1]  2   3   4  ...
//!  ...
//!    Cancel       OK
//! +-------------------------------------------------------+
//! key-set 1/2
//! A-Press  B-Keyset  Menu-Cancel  ...
//! ```

use std::fmt::Write as _;

use vkb_core::{KeyboardState, Slot};

/// Controls legend of the handheld build.
pub const FOOTER: &str =
    "A-Press  B-Keyset  Menu-Cancel  L/R-Caret  L2/R2-Edges  Y-Backspace  X-Space  Start-OK";

/// Glyph drawn for the caret.
pub const CARET: char = '|';

/// Visible stand-in for the space key.
const SPACE_GLYPH: &str = "␣";

/// Render `state` as multi-line text.
///
/// The field shows the masked text in confidential mode. The caret is drawn
/// only when `show_caret` is set; the selected slot is bracketed.
#[must_use]
pub fn render_text(state: &KeyboardState<'_>, show_caret: bool) -> String {
    let geometry = state.grid.geometry();
    let mut out = String::new();

    if let Some(message) = state.message {
        let _ = writeln!(out, "{message}");
    }

    let (field, caret) = state.field();
    out.push_str("> ");
    out.push_str(&field[..caret]);
    if show_caret {
        out.push(CARET);
    }
    out.push_str(&field[caret..]);
    out.push('\n');

    let rule = format!("+{}+\n", "-".repeat(geometry.columns() * 4 + 3));
    out.push_str(&rule);

    for row in 0..geometry.rows() {
        out.push(' ');
        for column in 0..geometry.columns() {
            let index = geometry.index_of(row, column);
            let key = state.grid.key(state.key_set, index).unwrap_or("?");
            let key = if key == " " { SPACE_GLYPH } else { key };
            if state.slot == Slot::Key(index) {
                let _ = write!(out, "[{key}] ");
            } else {
                let _ = write!(out, " {key}  ");
            }
        }
        trim_end_in_place(&mut out);
        out.push('\n');
    }

    let cancel = if state.slot == Slot::Cancel { "[ Cancel ]" } else { "  Cancel  " };
    let ok = if state.slot == Slot::Ok { "[ OK ]" } else { "  OK  " };
    let actions = format!(" {cancel}   {ok}");
    let _ = writeln!(out, "{}", actions.trim_end());

    out.push_str(&rule);
    let _ = writeln!(
        out,
        "key-set {}/{}",
        state.key_set + 1,
        state.grid.key_set_count()
    );
    out.push_str(FOOTER);
    out.push('\n');
    out
}

fn trim_end_in_place(text: &mut String) {
    let trimmed = text.trim_end_matches(' ').len();
    text.truncate(trimmed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use vkb_core::{Action, KeyboardController, SessionConfig};

    #[test]
    fn renders_default_keyboard() {
        let kb = KeyboardController::new(SessionConfig::default().with_message("Name?"));
        let text = render_text(&kb.state(), true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name?");
        assert_eq!(lines[1], "> |");
        assert!(lines[3].starts_with(" [1]  2   3"), "{}", lines[3]);
        assert!(lines[3].ends_with('«'));
        assert!(lines[6].ends_with(SPACE_GLYPH));
        assert_eq!(lines[7], "   Cancel       OK");
        assert_eq!(lines[9], "key-set 1/2");
        assert_eq!(lines[10], FOOTER);
    }

    #[test]
    fn brackets_follow_selection_and_key_set() {
        let mut kb = KeyboardController::new(SessionConfig::default());
        kb.process_action(Action::SwitchKeySet);
        kb.process_action(Action::Right);
        let text = render_text(&kb.state(), false);
        assert!(text.contains(" !  [@]  #"), "{text}");
        assert!(text.contains("key-set 2/2"));

        kb.select(53).unwrap();
        let text = render_text(&kb.state(), false);
        assert!(text.contains("Cancel     [ OK ]"), "{text}");
    }

    #[test]
    fn caret_sits_inside_the_field() {
        let mut kb = KeyboardController::new(SessionConfig::default().with_initial_text("ab"));
        kb.process_action(Action::CaretLeft);
        let text = render_text(&kb.state(), true);
        assert!(text.contains("> a|b\n"));
        let text = render_text(&kb.state(), false);
        assert!(text.contains("> ab\n"));
    }

    #[test]
    fn confidential_field_is_masked() {
        let config = SessionConfig::default()
            .with_initial_text("pw")
            .confidential(true);
        let kb = KeyboardController::new(config);
        let text = render_text(&kb.state(), true);
        assert!(text.contains("> ••|\n"), "{text}");
        assert!(!text.contains("pw"));
    }
}
