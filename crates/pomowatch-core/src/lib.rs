//! # Pomowatch Core Library
//!
//! Core logic for the Pomowatch Pomodoro session timer. The library is
//! presentation-free: a front end forwards user intents (start / pause /
//! stop) and renders the published view state; the library decides
//! everything else.
//!
//! ## Architecture
//!
//! - **Session engine**: the Initial/Running/Paused lifecycle
//!   controller. No internal clock - the host calls `tick()` once per
//!   second while the session runs
//! - **Cycle policy**: pure Work/ShortBreak/LongBreak rotation with the
//!   work-segment counter that schedules long breaks
//! - **Countdown**: logical one-second countdown primitive
//! - **View state**: last-value-cached `H:M:S` text, labels and
//!   progress fraction for the presentation layer
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: session controller and effect interpreter
//! - [`CyclePolicy`]: phase rotation policy
//! - [`Countdown`]: countdown primitive
//! - [`Config`]: TOML configuration management

pub mod config;
pub mod countdown;
pub mod cycle;
pub mod error;
pub mod events;
pub mod session;
pub mod view;

pub use config::Config;
pub use countdown::Countdown;
pub use cycle::{CyclePolicy, Phase, PhaseKind};
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use session::{Intent, PhaseDurations, SessionEngine, SessionState};
pub use view::ViewState;
