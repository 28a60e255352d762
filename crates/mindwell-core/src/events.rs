use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the timer produces an Event.
/// The CLI prints them as JSON; a GUI would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        session_id: String,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionStopped {
        at: DateTime<Utc>,
    },
    SessionRestarted {
        session_id: String,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        session_id: String,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        session_id: String,
        elapsed_secs: u64,
        remaining_secs: u64,
        total_secs: u64,
        progress_ratio: f64,
        at: DateTime<Utc>,
    },
}
