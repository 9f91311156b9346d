//! # Session State
//!
//! The two flags the event loop cares about. They mirror the control record
//! (byte 0 and byte 4) but are tracked locally so the loop never has to
//! re-read the attribute stream to decide whether to keep going.
//!
//! State changes only happen through `update(session, record, action)` in
//! action.rs.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub display_enabled: bool,
    pub terminate_requested: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            display_enabled: true,
            terminate_requested: false,
        }
    }

    /// Loop continuation condition.
    pub fn is_running(&self) -> bool {
        !self.terminate_requested
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_new_defaults() {
        let session = Session::new();
        assert!(session.display_enabled);
        assert!(!session.terminate_requested);
        assert!(session.is_running());
    }
}
