//! Foreground session loop.
//!
//! Starts a session immediately and drives the engine once per second
//! until ctrl-c (which stops the session cleanly) or until the
//! requested number of long breaks has completed.

use std::time::Duration;

use clap::Args;
use pomowatch_core::view::phase_label;
use pomowatch_core::{Config, Event, Phase, PhaseDurations, SessionEngine};

#[derive(Args)]
pub struct RunArgs {
    /// Work phase length in minutes (overrides config)
    #[arg(long, value_name = "MIN")]
    work: Option<u32>,
    /// Short break length in minutes (overrides config)
    #[arg(long, value_name = "MIN")]
    short_break: Option<u32>,
    /// Long break length in minutes (overrides config)
    #[arg(long, value_name = "MIN")]
    long_break: Option<u32>,
    /// Work segments before a long break (overrides config)
    #[arg(long)]
    segments: Option<u32>,
    /// Interpret duration values as seconds (demo scale)
    #[arg(long)]
    seconds: bool,
    /// Exit after this many completed long breaks
    #[arg(long)]
    cycles: Option<u32>,
    /// Emit JSON events instead of status lines
    #[arg(long)]
    json: bool,
}

fn resolve_plan(args: &RunArgs) -> PhaseDurations {
    let schedule = Config::load_or_default().schedule;
    let work = args.work.unwrap_or(schedule.work_minutes);
    let short_break = args.short_break.unwrap_or(schedule.short_break_minutes);
    let long_break = args.long_break.unwrap_or(schedule.long_break_minutes);
    let unit = if args.seconds { 1 } else { 60 };
    PhaseDurations {
        work: Duration::from_secs(u64::from(work) * unit),
        short_break: Duration::from_secs(u64::from(short_break) * unit),
        long_break: Duration::from_secs(u64::from(long_break) * unit),
        work_segments: args.segments.unwrap_or(schedule.work_segments),
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let plan = resolve_plan(&args);
    log::debug!("phase plan: {plan:?}");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()?;
    runtime.block_on(drive(plan, &args))
}

async fn drive(plan: PhaseDurations, args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = SessionEngine::with_durations(plan);
    if let Some(event) = engine.start() {
        emit(&event, &engine, args.json)?;
    }

    let mut long_breaks = 0u32;
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first interval tick completes immediately; consume it so the
    // first engine tick lands a full second after start.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                if let Some(event) = engine.stop() {
                    emit(&event, &engine, args.json)?;
                }
                break;
            }
            _ = interval.tick() => {
                let Some(event) = engine.tick() else { continue };
                emit(&event, &engine, args.json)?;
                if let Event::PhaseCompleted { completed: Phase::LongBreak, .. } = event {
                    long_breaks += 1;
                    if args.cycles.is_some_and(|c| long_breaks >= c) {
                        if let Some(event) = engine.stop() {
                            emit(&event, &engine, args.json)?;
                        }
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}

fn emit(event: &Event, engine: &SessionEngine, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::Tick { .. } => {
            let v = engine.view();
            println!(
                "{:>10}  {:<10} {:>3.0}%",
                v.timer_text,
                v.phase_label,
                v.progress * 100.0
            );
        }
        Event::PhaseCompleted { completed, next, .. } => {
            println!("{} finished; {} begins", phase_label(*completed), phase_label(*next));
        }
        Event::SessionStarted { .. } => {
            let v = engine.view();
            println!("session started: {} {}", v.phase_label, v.timer_text);
        }
        Event::SessionPaused { .. } => println!("session paused"),
        Event::SessionStopped { .. } => println!("session stopped"),
        Event::StateSnapshot { .. } => {}
    }
    Ok(())
}
