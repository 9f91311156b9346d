//! Draws the clock line and the board in place.
//!
//! ```text
//! row 1   Time: 2024-05-01 12:00:00
//! ...     (engine text scrolls here)
//! row 9   <cleared>
//! row 10  +---+---+---+
//!         | X | O |   |
//!         +---+---+---+
//!         ...
//! ```
//!
//! Only the clock line and everything from row 9 down are cleared, never the
//! whole screen, so redraws do not flicker.

use chrono::{DateTime, TimeZone};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use std::fmt::Display;
use std::io::{self, Write};

use crate::core::board::{Board, BoardFrame};

pub const TIME_FORMAT: &str = "Time: %Y-%m-%d %H:%M:%S";

/// Zero-based terminal row the board region starts at.
const BOARD_ROW: u16 = 8;

const SEPARATOR: &str = "+---+---+---+";

/// The grid as plain lines, top separator to bottom separator.
pub fn board_lines(board: &Board) -> Vec<String> {
    let mut lines = Vec::with_capacity(7);
    for row in board.rows() {
        lines.push(SEPARATOR.to_string());
        lines.push(format!(
            "| {} | {} | {} |",
            row[0].glyph(),
            row[1].glyph(),
            row[2].glyph()
        ));
    }
    lines.push(SEPARATOR.to_string());
    lines
}

pub fn render<W, Tz>(out: &mut W, frame: BoardFrame, now: &DateTime<Tz>) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    queue!(
        out,
        MoveTo(0, 0),
        Clear(ClearType::CurrentLine),
        Print(now.format(TIME_FORMAT)),
        Clear(ClearType::FromCursorDown),
        MoveTo(0, BOARD_ROW),
        Clear(ClearType::FromCursorDown),
        Print("\n")
    )?;
    for line in board_lines(&frame.decode()) {
        queue!(out, Print(line), Print("\n"))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rendered(frame: u32) -> String {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap();
        let mut out = Vec::new();
        render(&mut out, BoardFrame(frame), &now).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_board_lines_layout() {
        let lines = board_lines(&BoardFrame::from_le_bytes([0x49, 0, 0, 0]).decode());
        assert_eq!(
            lines,
            vec![
                "+---+---+---+",
                "| X | O |   |",
                "+---+---+---+",
                "| X |   |   |",
                "+---+---+---+",
                "|   |   |   |",
                "+---+---+---+",
            ]
        );
    }

    #[test]
    fn test_render_writes_clock_then_board() {
        let text = rendered(0x49);
        let clock = text.find("Time: 2024-05-01 12:30:45").expect("clock line");
        let board = text.find("| X | O |   |").expect("first row");
        assert!(clock < board);
        assert!(text.ends_with("+---+---+---+\n"));
    }

    #[test]
    fn test_render_moves_cursor_instead_of_clearing_screen() {
        let text = rendered(0);
        assert!(text.starts_with("\x1b[1;1H"));
        assert!(text.contains("\x1b[9;1H"));
        assert!(!text.contains("\x1b[2J"));
    }

    #[test]
    fn test_render_reserved_value() {
        // (2,2) = 3
        let text = rendered(3 << 16);
        assert!(text.contains("|   |   | ? |"));
    }
}
