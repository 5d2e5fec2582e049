//! Display mode tracking
//!
//! Tracks visibility, ambient mode and the device's capability flags, and
//! derives the single predicate that decides whether periodic refresh runs.

pub mod controller;
pub mod events;

pub use controller::{
    CapabilityFlags, DisplayMode, ModeController, ModeTransition, RefreshState, RunState,
};
pub use events::ModeEvent;
