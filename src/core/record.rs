//! # Control Record
//!
//! The engine exposes a 6-byte control record on its attribute stream:
//!
//! ```text
//! offset  0        1 2 3     4      5
//!         display  opaque    end    opaque
//! ```
//!
//! Only the display flag and the end flag belong to this client. The opaque
//! bytes are owned by the engine and must be written back exactly as read.

use std::fmt;

/// Length of the record on the wire.
pub const RECORD_LEN: usize = 6;

const FLAG_OFF: u8 = b'0';
const FLAG_ON: u8 = b'1';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRecord {
    display: u8,
    middle: [u8; 3],
    end: u8,
    tail: u8,
}

impl ControlRecord {
    pub fn decode(bytes: [u8; RECORD_LEN]) -> Self {
        Self {
            display: bytes[0],
            middle: [bytes[1], bytes[2], bytes[3]],
            end: bytes[4],
            tail: bytes[5],
        }
    }

    pub fn encode(&self) -> [u8; RECORD_LEN] {
        [
            self.display,
            self.middle[0],
            self.middle[1],
            self.middle[2],
            self.end,
            self.tail,
        ]
    }

    /// Anything other than `'0'` counts as enabled.
    pub fn display_enabled(&self) -> bool {
        self.display != FLAG_OFF
    }

    /// Flips the display flag: any enabled value becomes `'0'`, `'0'` becomes `'1'`.
    pub fn toggle_display(&mut self) {
        self.display = if self.display_enabled() { FLAG_OFF } else { FLAG_ON };
    }

    pub fn end_requested(&self) -> bool {
        self.end == FLAG_ON
    }

    pub fn request_end(&mut self) {
        self.end = FLAG_ON;
    }
}

impl fmt::Display for ControlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.encode()))
    }
}
