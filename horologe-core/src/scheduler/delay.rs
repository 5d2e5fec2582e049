//! Wall-clock aligned delays

/// Interactive refresh period in milliseconds
pub const INTERACTIVE_UPDATE_RATE_MS: u32 = 1000;

/// Delay from `now_ms` to the next multiple of `period_ms`
///
/// The result is in `1..=period_ms`: a tick that fires exactly on a boundary
/// waits a full period rather than firing again immediately. Scheduling
/// from `now + next_delay_ms(now)` always lands on a boundary, so ticks
/// never accumulate drift. A zero period is treated as 1 ms.
pub fn next_delay_ms(now_ms: i64, period_ms: u32) -> u32 {
    let period = i64::from(period_ms.max(1));
    (period - now_ms.rem_euclid(period)) as u32
}
