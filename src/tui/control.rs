//! Control-attribute client: turns keyboard commands into read-modify-write
//! cycles on the engine's control record.

use log::{info, warn};
use std::fs::OpenOptions;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use crate::core::action::{Action, Effect, update};
use crate::core::record::{ControlRecord, RECORD_LEN};
use crate::core::state::Session;

/// Where the control record lives. Always read and written whole.
pub trait AttributeStore {
    fn read_record(&mut self) -> io::Result<ControlRecord>;
    fn write_record(&mut self, record: &ControlRecord) -> io::Result<()>;
}

/// The sysfs attribute file. Opened fresh for every access.
pub struct AttrFile {
    path: PathBuf,
}

impl AttrFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AttributeStore for AttrFile {
    fn read_record(&mut self) -> io::Result<ControlRecord> {
        let mut file = OpenOptions::new().read(true).open(&self.path)?;
        let mut bytes = [0u8; RECORD_LEN];
        file.read_exact(&mut bytes)?;
        Ok(ControlRecord::decode(bytes))
    }

    fn write_record(&mut self, record: &ControlRecord) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&record.encode())
    }
}

/// Dispatches one raw key byte. Unknown bytes never touch the store.
pub fn handle_keypress<S, W>(
    byte: u8,
    store: &mut S,
    session: &mut Session,
    out: &mut W,
) -> io::Result<()>
where
    S: AttributeStore,
    W: Write,
{
    let Some(action) = Action::from_key(byte) else {
        return Ok(());
    };
    info!("Keyboard command: {:?}", action);

    let mut record = match store.read_record() {
        Ok(record) => record,
        Err(e) => {
            warn!("Cannot read control record: {}", e);
            // Still leave when asked to, even if the engine can't be told
            if action == Action::Terminate {
                session.display_enabled = false;
                session.terminate_requested = true;
            }
            return Ok(());
        }
    };

    let effect = update(session, &mut record, action);
    match store.write_record(&record) {
        Ok(()) => info!(
            "Control record now {:?} (display {}, end {})",
            record.to_string(),
            record.display_enabled(),
            record.end_requested()
        ),
        Err(e) => warn!("Cannot write control record {:?}: {}", record.to_string(), e),
    }

    if let Effect::Notice(text) = effect {
        out.write_all(text.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}
