//! # Engine Presence Check
//!
//! The kernel module publishes its load state as a single word in
//! `/sys/module/kxo/initstate`. We only start once that word is `live`.

use log::{debug, info};
use std::fmt;
use std::fs;
use std::path::Path;

pub const READY_TOKEN: &str = "live";

#[derive(Debug, PartialEq, Eq)]
pub enum StatusError {
    /// Status file missing or unreadable: the module is not loaded.
    NotLoaded,
    /// Module is present but reports something other than `live`.
    NotReady(String),
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusError::NotLoaded => write!(f, "kxo status : not loaded"),
            StatusError::NotReady(word) => write!(f, "kxo status : {word}"),
        }
    }
}

impl std::error::Error for StatusError {}

/// Reads the status file and checks its first line against `live`.
pub fn check(path: &Path) -> Result<(), StatusError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!("Cannot read {}: {}", path.display(), e);
            return Err(StatusError::NotLoaded);
        }
    };

    let word = contents.lines().next().unwrap_or("");
    if word != READY_TOKEN {
        return Err(StatusError::NotReady(word.to_string()));
    }
    info!("Engine is {READY_TOKEN} ({})", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn status_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_live_passes() {
        let file = status_file("live\n");
        assert_eq!(check(file.path()), Ok(()));
    }

    #[test]
    fn test_other_word_is_not_ready() {
        let file = status_file("coming\n");
        assert_eq!(
            check(file.path()),
            Err(StatusError::NotReady("coming".to_string()))
        );
    }

    #[test]
    fn test_empty_file_is_not_ready() {
        let file = status_file("");
        assert_eq!(check(file.path()), Err(StatusError::NotReady(String::new())));
    }

    #[test]
    fn test_missing_file_is_not_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let err = check(&dir.path().join("initstate")).unwrap_err();
        assert_eq!(err, StatusError::NotLoaded);
        assert_eq!(err.to_string(), "kxo status : not loaded");
    }

    #[test]
    fn test_trailing_whitespace_is_significant() {
        // Only the newline is stripped
        let file = status_file("live \n");
        assert!(check(file.path()).is_err());
    }
}
