//! Per-frame time and battery snapshots
//!
//! Snapshots are rebuilt for every draw and never carried across ticks.

use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Wall-clock fields of one instant in the active timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSnapshot {
    /// Hour of day, 0-23
    pub hour: i8,
    pub minute: i8,
    pub second: i8,
    /// Day of week, 1 = Sunday through 7 = Saturday
    pub day_of_week: i8,
    /// Month of year, 0 = January through 11 = December
    pub month: i8,
    /// Day of month, 1-31
    pub day_of_month: i8,
}

impl TimeSnapshot {
    /// Break an epoch-millisecond instant down in `tz`
    ///
    /// Instants outside the representable range collapse to the Unix epoch.
    pub fn at(epoch_ms: i64, tz: &TimeZone) -> Self {
        let timestamp = Timestamp::from_millisecond(epoch_ms).unwrap_or_else(|_| {
            crate::warn!("clock reading {} ms out of range", epoch_ms);
            Timestamp::UNIX_EPOCH
        });
        let dt = tz.to_datetime(timestamp);

        Self {
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            day_of_week: dt.weekday().to_sunday_one_offset(),
            month: dt.month() - 1,
            day_of_month: dt.day(),
        }
    }

    /// Hour of the half-day, 0-11 (noon and midnight are 0)
    pub fn hour_of_half_day(&self) -> i8 {
        self.hour.rem_euclid(12)
    }
}

/// Charging state reported by the power source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryStatus {
    #[default]
    Unknown,
    Charging,
    Discharging,
    NotCharging,
    Full,
}

impl BatteryStatus {
    /// Map a host status code (1 = unknown .. 5 = full)
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => BatteryStatus::Charging,
            3 => BatteryStatus::Discharging,
            4 => BatteryStatus::NotCharging,
            5 => BatteryStatus::Full,
            _ => BatteryStatus::Unknown,
        }
    }
}

/// Battery reading taken at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatterySnapshot {
    /// Charge level 0-100, or [`BatterySnapshot::UNKNOWN_LEVEL`]
    pub level: i32,
    pub status: BatteryStatus,
}

impl BatterySnapshot {
    /// Level reported when the power source has no reading
    pub const UNKNOWN_LEVEL: i32 = -1;

    pub const fn new(level: i32, status: BatteryStatus) -> Self {
        Self { level, status }
    }

    /// Snapshot for a power source that could not be read
    pub const fn unknown() -> Self {
        Self::new(Self::UNKNOWN_LEVEL, BatteryStatus::Unknown)
    }

    /// Build from a raw host reading scaled to `scale`
    ///
    /// Negative levels or a non-positive scale yield an unknown reading.
    pub fn from_raw(level: i32, scale: i32, status_code: i32) -> Self {
        let status = BatteryStatus::from_code(status_code);
        if level < 0 || scale <= 0 {
            return Self::new(Self::UNKNOWN_LEVEL, status);
        }
        let percent = (level as i64 * 100 / scale as i64).min(100) as i32;
        Self::new(percent, status)
    }

    /// Level as a percentage, if known
    pub fn percent(&self) -> Option<u8> {
        u8::try_from(self.level).ok().filter(|l| *l <= 100)
    }
}

impl Default for BatterySnapshot {
    fn default() -> Self {
        Self::unknown()
    }
}
