//! # Actions
//!
//! Every keyboard command becomes an `Action`.
//! Ctrl-P? That's `Action::ToggleDisplay`. Ctrl-Q? `Action::Terminate`.
//!
//! The `update()` function applies an action to the session and to the
//! control record that was just read from the engine, then returns the
//! `Effect` the caller should carry out. No I/O here; reading and writing
//! the attribute stream happens in `tui::control`.
//!
//! ```text
//! Session + ControlRecord + Action  →  update()  →  Effect
//! ```

use crate::core::record::ControlRecord;
use crate::core::state::Session;

/// Raw byte for Ctrl-P.
pub const KEY_TOGGLE_DISPLAY: u8 = 16;
/// Raw byte for Ctrl-Q.
pub const KEY_TERMINATE: u8 = 17;

pub const DISPLAY_STOPPED_NOTICE: &str = "\n\nStopping to display the chess board...\n";
pub const TERMINATE_NOTICE: &str = "\n\nStopping the kernel space tic-tac-toe game...\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleDisplay,
    Terminate,
}

impl Action {
    /// Other keys are reserved and map to nothing.
    pub fn from_key(byte: u8) -> Option<Self> {
        match byte {
            KEY_TOGGLE_DISPLAY => Some(Action::ToggleDisplay),
            KEY_TERMINATE => Some(Action::Terminate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Print a status line to the terminal.
    Notice(&'static str),
}

pub fn update(session: &mut Session, record: &mut ControlRecord, action: Action) -> Effect {
    match action {
        Action::ToggleDisplay => {
            record.toggle_display();
            session.display_enabled = !session.display_enabled;
            if session.display_enabled {
                Effect::None
            } else {
                Effect::Notice(DISPLAY_STOPPED_NOTICE)
            }
        }
        Action::Terminate => {
            record.request_end();
            session.display_enabled = false;
            session.terminate_requested = true;
            Effect::Notice(TERMINATE_NOTICE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(s: &[u8; 6]) -> ControlRecord {
        ControlRecord::decode(*s)
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Action::from_key(16), Some(Action::ToggleDisplay));
        assert_eq!(Action::from_key(17), Some(Action::Terminate));
        assert_eq!(Action::from_key(b'q'), None);
        assert_eq!(Action::from_key(3), None);
    }

    #[test]
    fn test_toggle_off_emits_notice() {
        let mut session = Session::new();
        let mut rec = record(b"1ABCD0");
        let effect = update(&mut session, &mut rec, Action::ToggleDisplay);
        assert_eq!(effect, Effect::Notice(DISPLAY_STOPPED_NOTICE));
        assert!(!session.display_enabled);
        assert_eq!(&rec.encode(), b"0ABCD0");
    }

    #[test]
    fn test_toggle_back_on_is_silent() {
        let mut session = Session::new();
        let mut rec = record(b"1ABCD0");
        update(&mut session, &mut rec, Action::ToggleDisplay);
        let effect = update(&mut session, &mut rec, Action::ToggleDisplay);
        assert_eq!(effect, Effect::None);
        assert!(session.display_enabled);
        assert_eq!(&rec.encode(), b"1ABCD0");
    }

    #[test]
    fn test_terminate_is_one_way() {
        let mut session = Session::new();
        let mut rec = record(b"1ABCD0");
        let effect = update(&mut session, &mut rec, Action::Terminate);
        assert_eq!(effect, Effect::Notice(TERMINATE_NOTICE));
        assert!(session.terminate_requested);
        assert!(!session.display_enabled);
        assert_eq!(&rec.encode(), b"1ABC10");

        // A later toggle must not revive the session
        update(&mut session, &mut rec, Action::ToggleDisplay);
        assert!(session.terminate_requested);
        assert!(!session.is_running());
    }
}
