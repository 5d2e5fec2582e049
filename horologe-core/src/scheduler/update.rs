//! Update scheduler implementation

use super::delay::next_delay_ms;
use crate::mode::RefreshState;
use crate::traits::{RedrawSink, Timer, TimerHandle};

/// Result of delivering a timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Handle was not the pending tick; nothing happened
    Stale,
    /// Redraw requested, refresh no longer wanted
    Finished,
    /// Redraw requested and the next tick scheduled after `delay_ms`
    Rescheduled { delay_ms: u32 },
}

/// Owner of the single pending refresh tick
///
/// The timer is owned exclusively by the scheduler. Dropping the scheduler
/// cancels whatever is still pending.
pub struct UpdateScheduler<T: Timer> {
    timer: T,
    /// The one tick that may still fire
    pending: Option<TimerHandle>,
    /// Interactive refresh period (ms)
    period_ms: u32,
}

impl<T: Timer> UpdateScheduler<T> {
    /// Create a stopped scheduler
    pub fn new(timer: T, period_ms: u32) -> Self {
        Self {
            timer,
            pending: None,
            period_ms: period_ms.max(1),
        }
    }

    /// Schedule an immediate tick unless one is already pending
    ///
    /// Returns whether a tick was scheduled.
    pub fn start(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(self.timer.schedule(0));
        crate::debug!("refresh timer started");
        true
    }

    /// Cancel the pending tick, if any
    ///
    /// Returns whether a tick was cancelled.
    pub fn stop(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                self.timer.cancel(handle);
                crate::debug!("refresh timer stopped");
                true
            }
            None => false,
        }
    }

    /// Re-evaluate the refresh decision after a mode change
    ///
    /// Idempotent in both directions.
    pub fn on_mode_changed(&mut self, should_run: bool) -> RefreshState {
        if should_run {
            self.start();
        } else {
            self.stop();
        }
        self.state()
    }

    /// Deliver a fired tick
    ///
    /// A live tick always requests a redraw first, then re-arms only if
    /// refresh is still wanted. Ticks that were cancelled or superseded are
    /// ignored entirely so a stopped scheduler can never re-arm itself.
    pub fn tick<R: RedrawSink>(
        &mut self,
        handle: TimerHandle,
        now_ms: i64,
        should_run: bool,
        redraw: &mut R,
    ) -> TickOutcome {
        if self.pending != Some(handle) {
            crate::debug!("ignoring stale tick {}", handle.id());
            return TickOutcome::Stale;
        }
        self.pending = None;

        redraw.invalidate();

        if !should_run {
            return TickOutcome::Finished;
        }
        let delay_ms = next_delay_ms(now_ms, self.period_ms);
        self.pending = Some(self.timer.schedule(delay_ms));
        crate::trace!("next tick in {} ms", delay_ms);
        TickOutcome::Rescheduled { delay_ms }
    }

    /// Release the timer for teardown
    pub fn cancel(&mut self) {
        self.stop();
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> RefreshState {
        RefreshState::from_should_run(self.is_running())
    }

    /// Handle of the pending tick
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Access the owned timer
    pub fn timer(&self) -> &T {
        &self.timer
    }
}

impl<T: Timer> Drop for UpdateScheduler<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
