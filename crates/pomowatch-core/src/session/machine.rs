//! Session lifecycle transition table.
//!
//! The declarative half of the session controller: a closed set of
//! `(state, intent) -> (next state, effect)` mappings. Effects are
//! descriptors only; [`SessionEngine`](super::SessionEngine) interprets
//! them. Pairs missing from the table are no-ops - an illegal intent
//! for the current state is ignored rather than surfaced.

use serde::{Deserialize, Serialize};

/// User-facing session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Initial,
    Running,
    Paused,
}

/// User intents forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Start,
    Pause,
    Stop,
}

/// Side effects requested by a session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionEffect {
    /// Begin the work phase, or continue from preserved remaining time.
    ResumeCountdown,
    /// Cancel ticking, preserving remaining time.
    PauseCountdown,
    /// Reset countdown, ready text and phase policy.
    ResetSession,
}

/// `(state, intent)` table. `None` means the intent is ignored in that
/// state.
pub(crate) fn transition(
    state: SessionState,
    intent: Intent,
) -> Option<(SessionState, SessionEffect)> {
    use Intent::*;
    use SessionEffect::*;
    use SessionState::*;
    match (state, intent) {
        (Initial, Start) => Some((Running, ResumeCountdown)),
        (Running, Pause) => Some((Paused, PauseCountdown)),
        (Running, Stop) => Some((Initial, ResetSession)),
        (Paused, Start) => Some((Running, ResumeCountdown)),
        (Paused, Stop) => Some((Initial, ResetSession)),
        _ => None,
    }
}
