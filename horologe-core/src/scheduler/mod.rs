//! Refresh scheduler
//!
//! Keeps at most one tick pending and aligns every rescheduled tick to the
//! next whole update period of the wall clock.

pub mod delay;
pub mod update;

pub use delay::{next_delay_ms, INTERACTIVE_UPDATE_RATE_MS};
pub use update::{TickOutcome, UpdateScheduler};
