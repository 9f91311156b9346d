//! # Core Logic
//!
//! Everything about the kxo protocol that does not touch the terminal.
//! It knows nothing about termios, poll or escape sequences.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • BoardFrame (decode)  │
//!                    │  • ControlRecord        │
//!                    │  • Session + Action     │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (poll/tty) │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`board`]: packed 3×3 board frames
//! - [`record`]: the 6-byte control record on the attribute stream
//! - [`state`]: the `Session` flags driving the event loop
//! - [`action`]: keyboard commands and the `update()` reducer
//! - [`status`]: engine presence check
//! - [`config`]: settings and their override hierarchy

pub mod action;
pub mod board;
pub mod config;
pub mod record;
pub mod state;
pub mod status;
