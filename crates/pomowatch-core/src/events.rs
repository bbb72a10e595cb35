use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cycle::{Phase, PhaseKind};
use crate::session::SessionState;

/// Every observable state change produces an `Event`.
/// A front end may render the stream directly or poll the cached view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        phase: Phase,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    SessionStopped {
        at: DateTime<Utc>,
    },
    Tick {
        remaining_ms: u64,
        timer_text: String,
        progress: f64,
        at: DateTime<Utc>,
    },
    /// A phase's countdown reached zero; the session rolled straight
    /// into `next`.
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        next_duration_ms: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        control: SessionState,
        phase: Phase,
        phase_kind: PhaseKind,
        timer_text: String,
        remaining_ms: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}
