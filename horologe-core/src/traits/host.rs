//! Host collaborator traits

use jiff::tz::TimeZone;

use super::timer::Timer;
use crate::snapshot::BatterySnapshot;

/// Wall clock
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;
}

/// System timezone and its change notifications
///
/// Change notifications are only wanted while the surface is visible, so
/// the face holds a subscription for exactly that span.
pub trait TimezoneSource {
    /// Live subscription; dropping it unsubscribes
    type Subscription;

    /// Current system timezone
    fn current(&self) -> TimeZone;

    /// Start delivering timezone change notifications
    fn subscribe(&mut self) -> Self::Subscription;
}

/// Power state query
pub trait BatterySource {
    /// Read the battery now
    ///
    /// Sources without a reading return [`BatterySnapshot::unknown`].
    fn battery(&mut self) -> BatterySnapshot;
}

/// Redraw request sink
///
/// Requests are fire-and-forget; the host may coalesce several into one
/// draw.
pub trait RedrawSink {
    fn invalidate(&mut self);
}

/// Collaborator set provided by a host
pub trait Platform {
    type Timer: Timer;
    type Clock: Clock;
    type Timezone: TimezoneSource;
    type Battery: BatterySource;
    type Redraw: RedrawSink;
}
