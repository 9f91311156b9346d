//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::io;

use crate::core::record::{ControlRecord, RECORD_LEN};
use crate::tui::control::AttributeStore;
use crate::tui::event::{EventSource, Ready};

/// An attribute store kept in memory that records every write.
pub struct MemoryStore {
    pub bytes: [u8; RECORD_LEN],
    pub reads: usize,
    pub writes: Vec<[u8; RECORD_LEN]>,
    fail: bool,
}

impl MemoryStore {
    pub fn new(bytes: &[u8; RECORD_LEN]) -> Self {
        Self {
            bytes: *bytes,
            reads: 0,
            writes: Vec::new(),
            fail: false,
        }
    }

    /// Every read and write fails, like a module that went away.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(b"000000")
        }
    }
}

impl AttributeStore for MemoryStore {
    fn read_record(&mut self) -> io::Result<ControlRecord> {
        self.reads += 1;
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no attribute"));
        }
        Ok(ControlRecord::decode(self.bytes))
    }

    fn write_record(&mut self, record: &ControlRecord) -> io::Result<()> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no attribute"));
        }
        self.bytes = record.encode();
        self.writes.push(self.bytes);
        Ok(())
    }
}

/// One scripted wake-up of the event loop.
pub enum Step {
    Key(u8),
    /// Keyboard woke us but the read had nothing.
    SpuriousKey,
    Device(Vec<u8>),
    DeviceError(io::ErrorKind),
    WaitError(io::ErrorKind),
}

/// Replays `Step`s in order. Running out of steps is reported as end of
/// stream so a test can never hang.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    current: Option<Step>,
    pub waits: usize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            current: None,
            waits: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl EventSource for ScriptedSource {
    fn wait(&mut self) -> io::Result<Ready> {
        self.waits += 1;
        let step = self.steps.pop_front().unwrap_or(Step::Device(Vec::new()));
        let ready = match &step {
            Step::Key(_) | Step::SpuriousKey => Ready::Keyboard,
            Step::Device(_) | Step::DeviceError(_) => Ready::Device,
            Step::WaitError(kind) => return Err(io::Error::from(*kind)),
        };
        self.current = Some(step);
        Ok(ready)
    }

    fn read_key(&mut self) -> io::Result<Option<u8>> {
        match self.current.take() {
            Some(Step::Key(byte)) => Ok(Some(byte)),
            _ => Ok(None),
        }
    }

    fn read_device(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.current.take() {
            Some(Step::Device(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Some(Step::DeviceError(kind)) => Err(io::Error::from(kind)),
            _ => Ok(0),
        }
    }
}
