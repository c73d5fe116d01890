//! Live progression: the score simulator and the refresh tasks that drive it.

pub mod live_score;
pub mod scheduler;

pub use live_score::{LiveScoreSimulator, SimPhase, TickOutcome};
pub use scheduler::{CancelHandle, PollOutcome, RefreshTask};
