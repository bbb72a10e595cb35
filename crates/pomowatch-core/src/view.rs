//! Published view state consumed by the presentation layer.
//!
//! The engine recomputes this on every tick and every transition; the
//! adapter reads the last value whenever it likes. Field for field it
//! is what a front end needs to render: the countdown text, the control
//! state for the button row, the phase label and styling kind, and the
//! progress fraction for the ring.

use serde::{Deserialize, Serialize};

use crate::cycle::{Phase, PhaseKind};
use crate::session::SessionState;

/// Strings rendered by the presentation layer.
pub mod phrases {
    /// Shown before any phase has started and after a stop.
    pub const READY: &str = "Ready";
    pub const WORK: &str = "Work";
    pub const SHORT_BREAK: &str = "Break";
    pub const LONG_BREAK: &str = "Long Break";
}

/// Human-readable label for a phase.
pub fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => phrases::WORK,
        Phase::ShortBreak => phrases::SHORT_BREAK,
        Phase::LongBreak => phrases::LONG_BREAK,
    }
}

/// `H:M:S` with non-zero-padded components, e.g. `0:24:59`.
pub fn format_hms(ms: u64) -> String {
    let total_secs = ms / 1_000;
    let hours = total_secs / 3_600;
    let minutes = (total_secs / 60) % 60;
    let seconds = total_secs % 60;
    format!("{hours}:{minutes}:{seconds}")
}

/// Last-value-cached state observed by the presentation adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewState {
    /// Remaining time as `H:M:S`, or the ready phrase when no phase is
    /// pending.
    pub timer_text: String,
    pub control: SessionState,
    pub phase_label: String,
    pub phase_kind: PhaseKind,
    /// 0.0 ..= 1.0 within the current phase.
    pub progress: f64,
}

impl ViewState {
    pub(crate) fn initial() -> Self {
        Self {
            timer_text: phrases::READY.to_string(),
            control: SessionState::Initial,
            phase_label: phrases::WORK.to_string(),
            phase_kind: PhaseKind::Work,
            progress: 0.0,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_components_are_not_padded() {
        assert_eq!(format_hms(0), "0:0:0");
        assert_eq!(format_hms(5_000), "0:0:5");
        assert_eq!(format_hms(25 * 60 * 1_000), "0:25:0");
        assert_eq!(format_hms(24 * 60 * 1_000 + 59_000), "0:24:59");
        assert_eq!(format_hms(3_600_000 + 60_000 + 1_000), "1:1:1");
    }

    #[test]
    fn sub_second_remainders_truncate() {
        assert_eq!(format_hms(1_999), "0:0:1");
        assert_eq!(format_hms(999), "0:0:0");
    }

    #[test]
    fn initial_view_is_ready() {
        let v = ViewState::initial();
        assert_eq!(v.timer_text, "Ready");
        assert_eq!(v.control, SessionState::Initial);
        assert_eq!(v.progress, 0.0);
    }
}
