//! # TUI Adapter
//!
//! The terminal-facing layer. Owns stdin, stdout and the kxo device, runs the
//! event loop, and translates raw key bytes and device payloads into calls
//! on the core.
//!
//! ## Event Loop
//!
//! One thread, one event per wake-up:
//!
//! ```text
//!            ┌──────── poll(stdin, /dev/kxo), no timeout ────────┐
//!            ▼                                                   │
//!   keyboard ready? ──yes──▶ read 1 byte ──▶ handle_keypress ────┤
//!            │ no                                                │
//!            ▼                                                   │
//!   device ready ──▶ read ≤1024 ──┬─ 4 bytes ──▶ render board ───┤
//!                                 ├─ n bytes ──▶ echo as text ───┤
//!                                 └─ 0 bytes ──▶ EndOfStream     │
//!                                                                │
//!   terminate_requested? ──no────────────────────────────────────┘
//! ```
//!
//! The keyboard wins when both inputs are ready; the device is picked up on
//! the next pass, so nothing is lost.

pub mod control;
pub mod event;
pub mod raw_mode;
pub mod render;

use log::{debug, info, warn};
use std::fmt;
use std::fs::File;
use std::io::{self, Write, stdout};

use crate::core::board::{BoardFrame, FRAME_LEN};
use crate::core::config::ResolvedConfig;
use crate::core::state::Session;
use crate::tui::control::{AttrFile, AttributeStore, handle_keypress};
use crate::tui::event::{EventSource, PollSource, Ready};
use crate::tui::raw_mode::{NonBlockingGuard, RawModeGuard};

/// Largest single read from the device.
pub const DEVICE_BUF_LEN: usize = 1024;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Ctrl-Q was pressed.
    Terminated,
    /// The engine closed the device stream.
    EndOfStream,
}

#[derive(Debug)]
pub enum RunError {
    OpenDevice(io::Error),
    Wait(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::OpenDevice(e) => write!(f, "Cannot open the kxo device: {e}"),
            RunError::Wait(e) => write!(f, "Error waiting for input: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

/// Opens the device, switches the terminal over and runs the loop.
///
/// Guards are dropped in reverse order on every way out: terminal mode
/// first, then stdin flags, then the device.
pub fn run(config: &ResolvedConfig) -> Result<LoopExit, RunError> {
    let device = File::open(&config.device_file).map_err(RunError::OpenDevice)?;
    info!("Opened {}", config.device_file.display());

    let mut source = PollSource::new(device).map_err(RunError::OpenDevice)?;
    let _non_blocking = NonBlockingGuard::enable();
    let raw_mode = RawModeGuard::enable();
    if !raw_mode.is_active() {
        info!("Keys are line-buffered; Ctrl-P and Ctrl-Q need Enter");
    }

    let mut store = AttrFile::new(&config.attr_file);
    let mut session = Session::new();
    let mut out = stdout().lock();

    let exit = run_loop(&mut source, &mut store, &mut session, &mut out).map_err(RunError::Wait)?;
    info!("Event loop finished: {:?}", exit);
    Ok(exit)
}

/// The event loop proper. Only a failing `wait` is returned as an error;
/// everything else is handled in place.
pub fn run_loop<E, S, W>(
    source: &mut E,
    store: &mut S,
    session: &mut Session,
    out: &mut W,
) -> io::Result<LoopExit>
where
    E: EventSource,
    S: AttributeStore,
    W: Write,
{
    let mut buf = [0u8; DEVICE_BUF_LEN];

    while session.is_running() {
        let ready = match source.wait() {
            Ok(ready) => ready,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        match ready {
            Ready::Keyboard => match source.read_key() {
                Ok(Some(byte)) => {
                    if let Err(e) = handle_keypress(byte, store, session, out) {
                        warn!("Cannot write status line: {}", e);
                    }
                }
                Ok(None) => {}
                Err(e) => debug!("Keyboard read failed: {}", e),
            },
            Ready::Device => match source.read_device(&mut buf) {
                Ok(0) => {
                    info!("Device stream closed by the engine");
                    return Ok(LoopExit::EndOfStream);
                }
                Ok(FRAME_LEN) => {
                    let frame = BoardFrame::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
                    if let Err(e) = render::render(out, frame, &chrono::Local::now()) {
                        warn!("Cannot draw board: {}", e);
                    }
                }
                Ok(n) => {
                    if let Err(e) = out.write_all(&buf[..n]).and_then(|()| out.flush()) {
                        warn!("Cannot echo engine text: {}", e);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => debug!("Device read failed: {}", e),
            },
        }
    }

    Ok(LoopExit::Terminated)
}
