//! One-shot timer trait

/// Identifier of one scheduled tick
///
/// Handles are issued by the [`Timer`] implementation and are only ever
/// compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHandle(u32);

impl TimerHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u32 {
        self.0
    }
}

/// Trait for the host's one-shot timer
///
/// When a scheduled delay elapses the host hands the handle back to the
/// face (`WatchFace::on_timer_fired`). A cancelled handle should not be
/// delivered, but the face tolerates it if it is.
pub trait Timer {
    /// Schedule a tick `delay_ms` from now
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle;

    /// Cancel a scheduled tick
    ///
    /// Cancelling a handle that already fired or was already cancelled is a
    /// no-op.
    fn cancel(&mut self, handle: TimerHandle);
}
