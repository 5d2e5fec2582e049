//! Scripted host session
//!
//! A fixed sequence of host callbacks, each at an offset from the start of
//! the run, exercising every path through the face once.

use horologe_core::events::TapType;

/// Host callback fired by the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Surface became visible or hidden
    Visible(bool),
    /// Entered or left ambient mode
    Ambient(bool),
    /// Host's ambient minute tick
    TimeTick,
    /// System timezone moved by this many minutes
    ShiftTimezone(i32),
    /// Tap gesture phase
    Tap(TapType),
    /// Surface torn down; ends the run
    Destroy,
}

/// One scripted callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Offset from the start of the run (ms)
    pub at_ms: u64,
    pub action: Action,
}

impl Step {
    const fn at(secs: u64, action: Action) -> Self {
        Self {
            at_ms: secs * 1000,
            action,
        }
    }
}

const SESSION: [Step; 10] = [
    Step::at(0, Action::Visible(true)),
    Step::at(2, Action::Tap(TapType::Complete)),
    Step::at(3, Action::Ambient(true)),
    Step::at(4, Action::TimeTick),
    Step::at(5, Action::Ambient(false)),
    Step::at(6, Action::ShiftTimezone(60)),
    Step::at(7, Action::Tap(TapType::Start)),
    Step::at(7, Action::Tap(TapType::Cancel)),
    Step::at(8, Action::Visible(false)),
    Step::at(9, Action::Visible(true)),
];

/// Default session ending with a destroy after `run_secs`
///
/// Steps at or past the end are dropped; the destroy is always last.
pub fn session(run_secs: u64) -> Vec<Step> {
    let end_ms = run_secs.saturating_mul(1000);
    SESSION
        .iter()
        .copied()
        .filter(|step| step.at_ms < end_ms)
        .chain(core::iter::once(Step {
            at_ms: end_ms,
            action: Action::Destroy,
        }))
        .collect()
}
