//! Terminal mode guards for stdin.
//!
//! Both guards capture the original state when created and put it back on
//! drop, so the terminal is restored on every exit path out of `tui::run`,
//! including `?` returns and panics.

use log::{debug, warn};
use nix::fcntl::{FcntlArg, OFlag, fcntl};
use nix::sys::termios::{self, InputFlags, LocalFlags, SetArg, Termios};
use std::io;

/// Keystrokes delivered one byte at a time: no line buffering, no echo,
/// and no XON/XOFF so Ctrl-Q and Ctrl-S reach us.
pub struct RawModeGuard {
    original: Option<Termios>,
}

impl RawModeGuard {
    /// Failing to switch modes is not fatal: the guard is returned anyway
    /// and simply has nothing to restore.
    pub fn enable() -> Self {
        let original = match termios::tcgetattr(io::stdin()) {
            Ok(t) => t,
            Err(e) => {
                warn!("Cannot read terminal attributes, staying in cooked mode: {}", e);
                return Self { original: None };
            }
        };

        let mut raw = original.clone();
        raw.input_flags.remove(InputFlags::IXON);
        raw.local_flags.remove(LocalFlags::ECHO | LocalFlags::ICANON);

        if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &raw) {
            warn!("Cannot enable raw mode: {}", e);
            return Self { original: None };
        }
        debug!("Raw mode enabled");
        Self {
            original: Some(original),
        }
    }

    pub fn is_active(&self) -> bool {
        self.original.is_some()
    }

    /// Restores the captured attributes. Safe to call more than once.
    pub fn disable(&mut self) {
        if let Some(original) = self.original.take() {
            match termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &original) {
                Ok(()) => debug!("Raw mode disabled"),
                Err(e) => warn!("Cannot restore terminal attributes: {}", e),
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.disable();
    }
}

/// Puts stdin into `O_NONBLOCK` so a single-byte read after a readiness
/// notification can never stall the loop.
pub struct NonBlockingGuard {
    original: Option<OFlag>,
}

impl NonBlockingGuard {
    pub fn enable() -> Self {
        let original = match fcntl(io::stdin(), FcntlArg::F_GETFL) {
            Ok(bits) => OFlag::from_bits_truncate(bits),
            Err(e) => {
                warn!("Cannot read stdin flags: {}", e);
                return Self { original: None };
            }
        };

        if let Err(e) = fcntl(io::stdin(), FcntlArg::F_SETFL(original | OFlag::O_NONBLOCK)) {
            warn!("Cannot make stdin non-blocking: {}", e);
            return Self { original: None };
        }
        Self {
            original: Some(original),
        }
    }

    pub fn disable(&mut self) {
        if let Some(original) = self.original.take() {
            if let Err(e) = fcntl(io::stdin(), FcntlArg::F_SETFL(original)) {
                warn!("Cannot restore stdin flags: {}", e);
            }
        }
    }
}

impl Drop for NonBlockingGuard {
    fn drop(&mut self) {
        self.disable();
    }
}
