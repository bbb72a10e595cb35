//! Session engine: binds the lifecycle table, the phase cycle policy
//! and the countdown together.
//!
//! The engine has no internal clock - the host calls [`tick()`] once
//! per second for as long as it wants the session driven. All mutation
//! happens on the caller's context, so intents and ticks are serialized
//! by construction and no locking exists anywhere in the crate.
//!
//! ## Lifecycle
//!
//! ```text
//! Initial -> Running <-> Paused -> Initial
//! ```
//!
//! Phases roll over inside Running: when a countdown completes the
//! engine asks the cycle policy for the next phase and keeps going.
//! Only a Stop intent returns to Initial.
//!
//! [`tick()`]: SessionEngine::tick

use std::time::Duration;

use chrono::Utc;

use crate::countdown::{Countdown, Step};
use crate::cycle::{CyclePolicy, Phase, DEFAULT_WORK_SEGMENTS};
use crate::events::Event;
use crate::view::{self, phrases, ViewState};

use super::machine::{self, Intent, SessionEffect, SessionState};

/// The single configurable parameter set: fixed durations for the three
/// phases plus the long-break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
    /// Work segments completed before a long break is due.
    pub work_segments: u32,
}

impl PhaseDurations {
    pub fn duration_of(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            work: Duration::from_secs(25 * 60),
            short_break: Duration::from_secs(5 * 60),
            long_break: Duration::from_secs(20 * 60),
            work_segments: DEFAULT_WORK_SEGMENTS,
        }
    }
}

/// Session controller and effect interpreter.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    state: SessionState,
    policy: CyclePolicy,
    durations: PhaseDurations,
    countdown: Countdown,
    /// Progress gained per tick: `1 / phase duration in seconds`.
    tick_weight: f64,
    view: ViewState,
}

impl SessionEngine {
    pub fn new() -> Self {
        Self::with_durations(PhaseDurations::default())
    }

    pub fn with_durations(durations: PhaseDurations) -> Self {
        Self {
            state: SessionState::Initial,
            policy: CyclePolicy::new(durations.work_segments),
            durations,
            countdown: Countdown::from_remaining(0),
            tick_weight: 0.0,
            view: ViewState::initial(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.policy.phase()
    }

    pub fn segments_left(&self) -> u32 {
        self.policy.segments_left()
    }

    pub fn remaining_ms(&self) -> u64 {
        self.countdown.remaining_ms()
    }

    pub fn progress(&self) -> f64 {
        self.view.progress
    }

    /// Last-value-cached published state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            control: self.state,
            phase: self.policy.phase(),
            phase_kind: self.policy.phase().kind(),
            timer_text: self.view.timer_text.clone(),
            remaining_ms: self.countdown.remaining_ms(),
            progress: self.view.progress,
            at: Utc::now(),
        }
    }

    // ── Intents ──────────────────────────────────────────────────────

    // Fire-and-forget from the adapter's point of view: the returned
    // event is the element published on the stream, `None` when the
    // intent is illegal for the current state.

    pub fn start(&mut self) -> Option<Event> {
        self.handle(Intent::Start)
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.handle(Intent::Pause)
    }

    pub fn stop(&mut self) -> Option<Event> {
        self.handle(Intent::Stop)
    }

    fn handle(&mut self, intent: Intent) -> Option<Event> {
        let Some((next, effect)) = machine::transition(self.state, intent) else {
            log::debug!("ignoring {intent:?} while {:?}", self.state);
            return None;
        };
        self.state = next;
        self.view.control = next;
        Some(self.run_effect(effect))
    }

    fn run_effect(&mut self, effect: SessionEffect) -> Event {
        match effect {
            SessionEffect::ResumeCountdown => self.resume_countdown(),
            SessionEffect::PauseCountdown => self.pause_countdown(),
            SessionEffect::ResetSession => self.reset_session(),
        }
    }

    fn resume_countdown(&mut self) -> Event {
        let remaining = self.countdown.remaining_ms();
        if remaining == 0 {
            // Fresh session: no phase has been started yet.
            self.enter_phase(Phase::Work);
        } else {
            self.countdown = Countdown::from_remaining(remaining);
        }
        Event::SessionStarted {
            phase: self.policy.phase(),
            remaining_ms: self.countdown.remaining_ms(),
            at: Utc::now(),
        }
    }

    fn pause_countdown(&mut self) -> Event {
        self.countdown.cancel();
        Event::SessionPaused {
            remaining_ms: self.countdown.remaining_ms(),
            at: Utc::now(),
        }
    }

    fn reset_session(&mut self) -> Event {
        // Progress and phase label keep their last values until the
        // next phase entry; only the countdown, ready text and policy
        // reset here.
        self.countdown = Countdown::from_remaining(0);
        self.policy.reset();
        self.tick_weight = 0.0;
        self.view.timer_text = phrases::READY.to_string();
        Event::SessionStopped { at: Utc::now() }
    }

    // ── Ticking ──────────────────────────────────────────────────────

    /// Host-driven tick: call once per second while the session runs.
    /// No-op unless Running. Emits `Tick` while time remains and
    /// `PhaseCompleted` on the tick that finishes a phase; the session
    /// rolls straight into the next phase without returning to Initial.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        match self.countdown.tick() {
            Step::Ticked { remaining_ms } => {
                self.view.timer_text = view::format_hms(remaining_ms);
                self.view.progress = (self.view.progress + self.tick_weight).min(1.0);
                Some(Event::Tick {
                    remaining_ms,
                    timer_text: self.view.timer_text.clone(),
                    progress: self.view.progress,
                    at: Utc::now(),
                })
            }
            Step::Finished => {
                self.view.progress = (self.view.progress + self.tick_weight).min(1.0);
                let completed = self.policy.phase();
                let next = self.policy.advance();
                self.enter_phase(next);
                Some(Event::PhaseCompleted {
                    completed,
                    next,
                    next_duration_ms: self.countdown.remaining_ms(),
                    at: Utc::now(),
                })
            }
            Step::Idle => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Phase setup: full duration, labels, progress reset, tick weight.
    fn enter_phase(&mut self, phase: Phase) {
        let duration = self.durations.duration_of(phase);
        self.countdown = Countdown::new(duration);
        self.tick_weight = tick_weight(duration);
        self.view.timer_text = view::format_hms(self.countdown.remaining_ms());
        self.view.phase_label = view::phase_label(phase).to_string();
        self.view.phase_kind = phase.kind();
        self.view.progress = 0.0;
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn tick_weight(duration: Duration) -> f64 {
    let secs = duration.as_secs();
    if secs == 0 {
        0.0
    } else {
        1.0 / secs as f64
    }
}
