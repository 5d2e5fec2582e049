//! Day and month names

const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name of a day of week, 1 = Sunday through 7 = Saturday
///
/// Anything else names no day and yields `""`.
pub fn day_of_week(value: i32) -> &'static str {
    usize::try_from(value)
        .ok()
        .and_then(|v| v.checked_sub(1))
        .and_then(|i| DAYS.get(i))
        .copied()
        .unwrap_or("")
}

/// Name of a month, 0 = January through 11 = December
///
/// Anything else names no month and yields `""`.
pub fn month_of_year(value: i32) -> &'static str {
    usize::try_from(value)
        .ok()
        .and_then(|i| MONTHS.get(i))
        .copied()
        .unwrap_or("")
}
