mod engine;
mod machine;

pub use engine::{PhaseDurations, SessionEngine};
pub use machine::{Intent, SessionState};
