//! Pomodoro phase rotation policy.
//!
//! Pure state machine: which phase follows which, and when a long break
//! is due. The policy counts remaining work segments and knows nothing
//! about time; the session engine asks it for the next phase exactly
//! once per completed countdown.
//!
//! The transition table is declarative: a `(phase, event)` pair maps to
//! a next phase plus an optional segment-counter effect, and a separate
//! interpreter applies the effect. Pairs missing from the table are
//! ignored.

use serde::{Deserialize, Serialize};

/// Work segments per long break when nothing is configured.
pub const DEFAULT_WORK_SEGMENTS: u32 = 2;

/// One segment of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

/// Styling category published to the presentation layer: both break
/// phases render as Break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Work,
    Break,
}

impl Phase {
    pub fn kind(self) -> PhaseKind {
        match self {
            Phase::Work => PhaseKind::Work,
            Phase::ShortBreak | Phase::LongBreak => PhaseKind::Break,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleEvent {
    Next,
    ToLongBreak,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleEffect {
    ReduceSegments,
    ResetSegments,
}

/// `(phase, event)` table. Undefined pairs return `None`.
fn transition(phase: Phase, event: CycleEvent) -> Option<(Phase, Option<CycleEffect>)> {
    use CycleEffect::*;
    use CycleEvent::*;
    match (phase, event) {
        (Phase::Work, Next) => Some((Phase::ShortBreak, None)),
        (Phase::Work, ToLongBreak) => Some((Phase::LongBreak, Some(ResetSegments))),
        (Phase::ShortBreak, Next) => Some((Phase::Work, Some(ReduceSegments))),
        (Phase::LongBreak, Next) => Some((Phase::Work, Some(ResetSegments))),
        (_, Reset) => Some((Phase::Work, Some(ResetSegments))),
        _ => None,
    }
}

/// Phase rotation policy with its work-segment counter.
///
/// The counter starts at the configured segments-per-long-break value,
/// loses one each time a short break hands back to work, and is
/// restored whenever a long break is entered or the policy resets. It
/// stays within `1..=configured` at every point.
#[derive(Debug, Clone)]
pub struct CyclePolicy {
    phase: Phase,
    work_segments: u32,
    segments_left: u32,
}

impl CyclePolicy {
    pub fn new(work_segments: u32) -> Self {
        let work_segments = work_segments.max(1);
        Self {
            phase: Phase::Work,
            work_segments,
            segments_left: work_segments,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn segments_left(&self) -> u32 {
        self.segments_left
    }

    /// Advance the cycle. Called exactly when the active phase's
    /// countdown completes: chooses between a short and a long break
    /// from the segment counter, applies the transition, and returns
    /// the phase to run next. Mutates the policy - this is the only
    /// advancing entry point.
    pub fn advance(&mut self) -> Phase {
        let event = if self.phase == Phase::Work && self.segments_left <= 1 {
            CycleEvent::ToLongBreak
        } else {
            CycleEvent::Next
        };
        self.apply(event);
        self.phase
    }

    /// Force the policy back to a fresh Work phase with a full counter.
    pub fn reset(&mut self) {
        self.apply(CycleEvent::Reset);
    }

    fn apply(&mut self, event: CycleEvent) {
        let Some((next, effect)) = transition(self.phase, event) else {
            return;
        };
        self.phase = next;
        match effect {
            Some(CycleEffect::ReduceSegments) => {
                // Work -> ShortBreak requires segments > 1, so the
                // decrement cannot leave the 1..=configured range.
                self.segments_left = self.segments_left.saturating_sub(1).max(1);
            }
            Some(CycleEffect::ResetSegments) => self.segments_left = self.work_segments,
            None => {}
        }
    }
}

impl Default for CyclePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_SEGMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rotation_period() {
        // segments = 2: Work -> ShortBreak -> Work -> LongBreak -> Work -> ...
        let mut p = CyclePolicy::new(2);
        assert_eq!(p.phase(), Phase::Work);
        assert_eq!(p.advance(), Phase::ShortBreak);
        assert_eq!(p.segments_left(), 2);
        assert_eq!(p.advance(), Phase::Work);
        assert_eq!(p.segments_left(), 1);
        assert_eq!(p.advance(), Phase::LongBreak);
        assert_eq!(p.segments_left(), 2);
        assert_eq!(p.advance(), Phase::Work);
        assert_eq!(p.segments_left(), 2);
        // Second lap repeats the same shape.
        assert_eq!(p.advance(), Phase::ShortBreak);
        assert_eq!(p.advance(), Phase::Work);
        assert_eq!(p.advance(), Phase::LongBreak);
    }

    #[test]
    fn single_segment_goes_straight_to_long_break() {
        let mut p = CyclePolicy::new(1);
        assert_eq!(p.advance(), Phase::LongBreak);
        assert_eq!(p.advance(), Phase::Work);
        assert_eq!(p.advance(), Phase::LongBreak);
    }

    #[test]
    fn reset_from_every_phase() {
        for advances in 0..4 {
            let mut p = CyclePolicy::new(3);
            for _ in 0..advances {
                p.advance();
            }
            p.reset();
            assert_eq!(p.phase(), Phase::Work);
            assert_eq!(p.segments_left(), 3);
        }
    }

    #[test]
    fn counter_stays_in_range() {
        let mut p = CyclePolicy::new(4);
        for _ in 0..32 {
            p.advance();
            assert!((1..=4).contains(&p.segments_left()));
        }
    }

    #[test]
    fn zero_segments_clamps_to_one() {
        let p = CyclePolicy::new(0);
        assert_eq!(p.segments_left(), 1);
    }

    #[test]
    fn break_phases_share_styling_kind() {
        assert_eq!(Phase::Work.kind(), PhaseKind::Work);
        assert_eq!(Phase::ShortBreak.kind(), PhaseKind::Break);
        assert_eq!(Phase::LongBreak.kind(), PhaseKind::Break);
    }
}
