//! Wall-clock sources for the clock view
//!
//! The renderer only needs local hours and minutes. [`OffsetClock`] derives
//! them from a UTC seconds source with either a fixed offset or the UK
//! summer time rule.

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Summer time starts and ends at 01:00 UTC
const SUMMER_TIME_SWITCH_HOUR: u64 = 1;

/// Local time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalTime {
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
}

impl LocalTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }
}

/// Source of the local time of day
pub trait TimeSource {
    fn now(&self) -> LocalTime;
}

/// Source of the current UTC time as seconds since the Unix epoch
pub trait UtcSource {
    fn unix_seconds(&self) -> u64;
}

/// Offset applied to UTC to get local time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UtcOffset {
    /// Fixed offset in whole hours
    Fixed(i8),
    /// GMT in winter, BST (+1) between the last Sundays of March and October
    #[default]
    UkSummerTime,
}

impl UtcOffset {
    /// Build from an optional configured offset, `None` selects UK summer time
    pub const fn from_hours(hours: Option<i8>) -> Self {
        match hours {
            Some(hours) => Self::Fixed(hours),
            None => Self::UkSummerTime,
        }
    }

    /// Offset in seconds at the given UTC instant
    pub fn offset_seconds(self, unix_seconds: u64) -> i64 {
        let hours = match self {
            Self::Fixed(hours) => i64::from(hours),
            Self::UkSummerTime => i64::from(is_uk_summer_time(unix_seconds)),
        };
        hours * 3600
    }
}

/// Clock that converts a UTC source to local time
#[derive(Debug, Clone)]
pub struct OffsetClock<U: UtcSource> {
    utc: U,
    offset: UtcOffset,
}

impl<U: UtcSource> OffsetClock<U> {
    pub const fn new(utc: U, offset: UtcOffset) -> Self {
        Self { utc, offset }
    }
}

impl<U: UtcSource> TimeSource for OffsetClock<U> {
    fn now(&self) -> LocalTime {
        local_time(self.utc.unix_seconds(), self.offset)
    }
}

/// Local time of day for a UTC instant and offset
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn local_time(unix_seconds: u64, offset: UtcOffset) -> LocalTime {
    let local = unix_seconds as i64 + offset.offset_seconds(unix_seconds);
    let secs_of_day = local.rem_euclid(SECS_PER_DAY as i64) as u64;
    LocalTime {
        hour: (secs_of_day / SECS_PER_HOUR) as u8,
        minute: ((secs_of_day % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
    }
}

/// Returns if British Summer Time is in effect at the given UTC instant
pub fn is_uk_summer_time(unix_seconds: u64) -> bool {
    let (year, _, _) = civil_from_days(unix_seconds / SECS_PER_DAY);
    let start = last_sunday_utc(year, 3) + SUMMER_TIME_SWITCH_HOUR * SECS_PER_HOUR;
    let end = last_sunday_utc(year, 10) + SUMMER_TIME_SWITCH_HOUR * SECS_PER_HOUR;
    (start..end).contains(&unix_seconds)
}

/// Midnight UTC (as Unix seconds) of the last Sunday of a 31-day month
fn last_sunday_utc(year: i64, month: u32) -> u64 {
    let last_day = days_from_civil(year, month, 31);
    // 1970-01-01 was a Thursday, weekday 0 = Sunday
    let weekday = (last_day + 4) % 7;
    (last_day - weekday) * SECS_PER_DAY
}

/// Days since 1970-01-01 for a proleptic Gregorian date
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn days_from_civil(year: i64, month: u32, day: u32) -> u64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era * 146_097 + doe - 719_468) as u64
}

/// Proleptic Gregorian date for days since 1970-01-01
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn civil_from_days(days: u64) -> (i64, u32, u32) {
    let z = days as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
