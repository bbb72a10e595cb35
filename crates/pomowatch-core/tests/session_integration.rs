//! End-to-end session scenarios driven tick by tick.

use std::time::Duration;

use proptest::prelude::*;

use pomowatch_core::{Phase, PhaseDurations, SessionEngine, SessionState};

/// Short durations so a full cycle is a handful of ticks:
/// work 5 s, short break 2 s, long break 3 s, two segments.
fn test_plan() -> PhaseDurations {
    PhaseDurations {
        work: Duration::from_secs(5),
        short_break: Duration::from_secs(2),
        long_break: Duration::from_secs(3),
        work_segments: 2,
    }
}

fn tick_n(engine: &mut SessionEngine, n: u32) {
    for _ in 0..n {
        engine.tick();
    }
}

#[test]
fn full_cycle_rotation() {
    let mut engine = SessionEngine::with_durations(test_plan());
    engine.start();
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(engine.segments_left(), 2);

    // 5 ticks finish Work; a short break follows, counter untouched
    // until the break completes.
    tick_n(&mut engine, 5);
    assert_eq!(engine.phase(), Phase::ShortBreak);
    assert_eq!(engine.segments_left(), 2);
    assert_eq!(engine.remaining_ms(), 2_000);

    // 2 ticks finish the break; leaving it costs one segment.
    tick_n(&mut engine, 2);
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(engine.segments_left(), 1);

    // Last segment: 5 ticks later the long break is due and the
    // counter refills.
    tick_n(&mut engine, 5);
    assert_eq!(engine.phase(), Phase::LongBreak);
    assert_eq!(engine.segments_left(), 2);
    assert_eq!(engine.remaining_ms(), 3_000);

    // 3 ticks close the long break; the cycle begins again.
    tick_n(&mut engine, 3);
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(engine.segments_left(), 2);
    assert_eq!(engine.remaining_ms(), 5_000);

    // The session never left Running across four phase boundaries.
    assert_eq!(engine.state(), SessionState::Running);
}

#[test]
fn pause_loses_no_tick() {
    let mut engine = SessionEngine::with_durations(test_plan());
    engine.start();
    tick_n(&mut engine, 2);
    assert_eq!(engine.remaining_ms(), 3_000);

    engine.pause();
    // A stale driver still ticking must not be observable.
    tick_n(&mut engine, 10);
    assert_eq!(engine.remaining_ms(), 3_000);

    engine.start();
    assert_eq!(engine.remaining_ms(), 3_000);
    // Exactly 3 more ticks finish the phase - nothing was lost or
    // double-counted around the pause.
    tick_n(&mut engine, 2);
    assert_eq!(engine.phase(), Phase::Work);
    tick_n(&mut engine, 1);
    assert_eq!(engine.phase(), Phase::ShortBreak);
}

#[test]
fn stop_mid_cycle_yields_a_fresh_cycle() {
    let mut engine = SessionEngine::with_durations(test_plan());
    engine.start();
    // Run into the second Work segment (counter at 1).
    tick_n(&mut engine, 7);
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(engine.segments_left(), 1);

    engine.stop();
    assert_eq!(engine.state(), SessionState::Initial);
    assert_eq!(engine.remaining_ms(), 0);

    // A fresh start replays the full rotation, proving the counter was
    // restored and not left at 1.
    engine.start();
    assert_eq!(engine.segments_left(), 2);
    tick_n(&mut engine, 5);
    assert_eq!(engine.phase(), Phase::ShortBreak);
    tick_n(&mut engine, 2);
    tick_n(&mut engine, 5);
    assert_eq!(engine.phase(), Phase::LongBreak);
}

#[test]
fn progress_tracks_tick_weight_and_stays_bounded() {
    let mut engine = SessionEngine::with_durations(test_plan());
    engine.start();
    for n in 1..=4u32 {
        engine.tick();
        let expected = f64::from(n) / 5.0;
        assert!(
            (engine.progress() - expected).abs() < 1e-9,
            "after {n} ticks expected {expected}, got {}",
            engine.progress()
        );
        assert!(engine.progress() <= 1.0);
    }
    // The completing tick resets progress for the next phase.
    engine.tick();
    assert_eq!(engine.progress(), 0.0);
    assert_eq!(engine.phase(), Phase::ShortBreak);
}

proptest! {
    // Any interleaving of intents and ticks keeps the published state
    // coherent, and a final stop always lands in Initial with nothing
    // left on the countdown.
    #[test]
    fn any_intent_sequence_stays_coherent(ops in proptest::collection::vec(0u8..4, 0..64)) {
        let mut engine = SessionEngine::with_durations(test_plan());
        for op in ops {
            match op {
                0 => { engine.start(); }
                1 => { engine.pause(); }
                2 => { engine.stop(); }
                _ => { engine.tick(); }
            }
            prop_assert!(engine.progress() >= 0.0);
            prop_assert!(engine.progress() <= 1.0);
            prop_assert!(engine.segments_left() >= 1);
            prop_assert!(engine.segments_left() <= 2);
            if engine.state() == SessionState::Running {
                prop_assert!(engine.remaining_ms() > 0);
            }
            if engine.state() == SessionState::Initial {
                prop_assert_eq!(engine.remaining_ms(), 0);
            }
        }
        engine.stop();
        prop_assert_eq!(engine.state(), SessionState::Initial);
        prop_assert_eq!(engine.remaining_ms(), 0);
    }
}
