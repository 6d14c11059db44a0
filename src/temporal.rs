//! Time / Date / DateTime wrappers
//!
//! The server stores temporal values in UTC. The wrappers here project them
//! to a local wall clock by pinning the fields onto a calendar instant, adding
//! the requested offset (or converting into the requested zone) and reading
//! back only the fields that matter.
//!
//! # Known approximation
//!
//! A bare [`Time`] has no date, so it is pinned to a fixed placeholder day
//! (2020-01-01). Offsets that roll the clock past midnight wrap correctly,
//! but zone-name projections use the placeholder day's rules: a zone with
//! daylight saving time always projects with its January offset.

use chrono::{
    Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{
    errors::DecodeError,
    wire::{Date, DateTime, Time, Value},
};

/// Placeholder calendar day that bare times are pinned to.
const PLACEHOLDER_DAY: (i32, u32, u32) = (2020, 1, 1);

/// Timezone context attached to decoded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    /// Offset from UTC in seconds
    pub offset: i32,
    /// Zone name reported alongside the offset
    pub name: String,
}

impl Default for TimezoneInfo {
    fn default() -> Self {
        TimezoneInfo {
            offset: 0,
            name: "UTC".to_string(),
        }
    }
}

impl TimezoneInfo {
    pub fn new(offset: i32, name: impl Into<String>) -> Self {
        TimezoneInfo {
            offset,
            name: name.into(),
        }
    }
}

/// Time of day as reported by the server.
#[derive(Debug, Clone)]
pub struct TimeWrapper {
    time: Time,
    timezone_info: TimezoneInfo,
}

impl TimeWrapper {
    pub fn new(time: Time, timezone_info: TimezoneInfo) -> Self {
        TimeWrapper {
            time,
            timezone_info,
        }
    }

    /// Wrap a wire value, failing with `InvalidEntity` unless it holds a time.
    pub fn try_from_value(value: &Value, timezone_info: &TimezoneInfo) -> Result<Self, DecodeError> {
        match value {
            Value::Time(time) => Ok(TimeWrapper::new(*time, timezone_info.clone())),
            _ => Err(DecodeError::InvalidEntity("time")),
        }
    }

    /// Hour in UTC
    pub fn hour(&self) -> i8 {
        self.time.hour
    }

    pub fn minute(&self) -> i8 {
        self.time.minute
    }

    pub fn second(&self) -> i8 {
        self.time.sec
    }

    pub fn microsec(&self) -> i32 {
        self.time.microsec
    }

    /// Time exactly as received, in UTC
    pub fn raw_time(&self) -> &Time {
        &self.time
    }

    /// Local time using the attached timezone offset.
    pub fn local_time(&self) -> Result<Time, DecodeError> {
        self.local_time_with_offset(self.timezone_info.offset)
    }

    /// Local time using a caller-supplied offset in seconds.
    pub fn local_time_with_offset(&self, offset_seconds: i32) -> Result<Time, DecodeError> {
        let pinned = pin_time(&self.time)?;
        let local = shift(pinned, offset_seconds)?;
        Ok(extract_time(&local))
    }

    /// Local time in a named zone (see [`resolve_zone`] for accepted names).
    pub fn local_time_with_zone_name(&self, zone_name: &str) -> Result<Time, DecodeError> {
        let pinned = pin_time(&self.time)?;
        let local = resolve_zone(zone_name)?.project(&pinned);
        Ok(extract_time(&local))
    }
}

impl PartialEq for TimeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

/// Calendar date. Dates carry no timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWrapper {
    date: Date,
}

impl DateWrapper {
    pub fn new(date: Date) -> Self {
        DateWrapper { date }
    }

    pub fn try_from_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Date(date) => Ok(DateWrapper::new(*date)),
            _ => Err(DecodeError::InvalidEntity("date")),
        }
    }

    pub fn year(&self) -> i16 {
        self.date.year
    }

    pub fn month(&self) -> i8 {
        self.date.month
    }

    pub fn day(&self) -> i8 {
        self.date.day
    }

    pub fn raw_date(&self) -> &Date {
        &self.date
    }
}

/// Date and time as reported by the server.
#[derive(Debug, Clone)]
pub struct DateTimeWrapper {
    date_time: DateTime,
    timezone_info: TimezoneInfo,
}

impl DateTimeWrapper {
    pub fn new(date_time: DateTime, timezone_info: TimezoneInfo) -> Self {
        DateTimeWrapper {
            date_time,
            timezone_info,
        }
    }

    pub fn try_from_value(value: &Value, timezone_info: &TimezoneInfo) -> Result<Self, DecodeError> {
        match value {
            Value::DateTime(dt) => Ok(DateTimeWrapper::new(*dt, timezone_info.clone())),
            _ => Err(DecodeError::InvalidEntity("datetime")),
        }
    }

    pub fn year(&self) -> i16 {
        self.date_time.year
    }

    pub fn month(&self) -> i8 {
        self.date_time.month
    }

    pub fn day(&self) -> i8 {
        self.date_time.day
    }

    pub fn hour(&self) -> i8 {
        self.date_time.hour
    }

    pub fn minute(&self) -> i8 {
        self.date_time.minute
    }

    pub fn second(&self) -> i8 {
        self.date_time.sec
    }

    pub fn microsec(&self) -> i32 {
        self.date_time.microsec
    }

    /// DateTime exactly as received, in UTC
    pub fn raw_datetime(&self) -> &DateTime {
        &self.date_time
    }

    /// Local datetime using the attached timezone offset.
    pub fn local_datetime(&self) -> Result<DateTime, DecodeError> {
        self.local_datetime_with_offset(self.timezone_info.offset)
    }

    pub fn local_datetime_with_offset(&self, offset_seconds: i32) -> Result<DateTime, DecodeError> {
        let pinned = pin_datetime(&self.date_time)?;
        let local = shift(pinned, offset_seconds)?;
        Ok(extract_datetime(&local))
    }

    pub fn local_datetime_with_zone_name(&self, zone_name: &str) -> Result<DateTime, DecodeError> {
        let pinned = pin_datetime(&self.date_time)?;
        let local = resolve_zone(zone_name)?.project(&pinned);
        Ok(extract_datetime(&local))
    }
}

impl PartialEq for DateTimeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.date_time == other.date_time
    }
}

/// Target of a zone-name projection.
#[derive(Debug, Clone, Copy)]
enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
    Local,
}

impl Zone {
    fn project(self, utc: &NaiveDateTime) -> NaiveDateTime {
        match self {
            Zone::Fixed(offset) => offset.from_utc_datetime(utc).naive_local(),
            Zone::Named(tz) => tz.from_utc_datetime(utc).naive_local(),
            Zone::Local => Local.from_utc_datetime(utc).naive_local(),
        }
    }
}

/// Resolve a zone name.
///
/// Accepted: `""`, `UTC`, `GMT`, `Z` (UTC), `Local` (host zone), fixed
/// offsets `±HH`, `±HHMM`, `±HH:MM` (optionally prefixed with `UTC` or `GMT`)
/// and IANA zone names such as `Asia/Shanghai`.
fn resolve_zone(name: &str) -> Result<Zone, DecodeError> {
    let trimmed = name.trim();
    match trimmed {
        "" | "UTC" | "GMT" | "Z" => return utc_zone(),
        "Local" => return Ok(Zone::Local),
        _ => {}
    }

    let offset_part = trimmed
        .strip_prefix("UTC")
        .or_else(|| trimmed.strip_prefix("GMT"))
        .unwrap_or(trimmed);

    if let Some(offset) = parse_fixed_offset(offset_part) {
        return Ok(Zone::Fixed(offset));
    }

    trimmed.parse::<Tz>().map(Zone::Named).map_err(|_| {
        log::debug!("timezone name '{}' did not resolve", name);
        DecodeError::UnsupportedValueType(format!("unknown timezone name '{}'", name))
    })
}

fn utc_zone() -> Result<Zone, DecodeError> {
    FixedOffset::east_opt(0)
        .map(Zone::Fixed)
        .ok_or_else(|| DecodeError::UnsupportedValueType("UTC offset".to_string()))
}

fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.chars().next()? {
        '+' => (1, &s[1..]),
        '-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn field_u32<T: TryInto<u32>>(value: T, field: &str) -> Result<u32, DecodeError> {
    value
        .try_into()
        .map_err(|_| DecodeError::UnsupportedValueType(format!("negative {} field", field)))
}

fn build_time(t_hour: i8, t_minute: i8, t_sec: i8, t_micro: i32) -> Result<NaiveTime, DecodeError> {
    NaiveTime::from_hms_micro_opt(
        field_u32(t_hour, "hour")?,
        field_u32(t_minute, "minute")?,
        field_u32(t_sec, "second")?,
        field_u32(t_micro, "microsecond")?,
    )
    .ok_or_else(|| {
        DecodeError::UnsupportedValueType(format!(
            "invalid time {:02}:{:02}:{:02}.{:06}",
            t_hour, t_minute, t_sec, t_micro
        ))
    })
}

/// Pin a bare time onto the placeholder day.
fn pin_time(time: &Time) -> Result<NaiveDateTime, DecodeError> {
    let (year, month, day) = PLACEHOLDER_DAY;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DecodeError::UnsupportedValueType("placeholder date".to_string()))?;
    let time = build_time(time.hour, time.minute, time.sec, time.microsec)?;
    Ok(date.and_time(time))
}

fn pin_datetime(dt: &DateTime) -> Result<NaiveDateTime, DecodeError> {
    let date = NaiveDate::from_ymd_opt(
        i32::from(dt.year),
        field_u32(dt.month, "month")?,
        field_u32(dt.day, "day")?,
    )
    .ok_or_else(|| {
        DecodeError::UnsupportedValueType(format!(
            "invalid date {:04}-{:02}-{:02}",
            dt.year, dt.month, dt.day
        ))
    })?;
    let time = build_time(dt.hour, dt.minute, dt.sec, dt.microsec)?;
    Ok(date.and_time(time))
}

/// Add an offset to a pinned instant; the caller extracts what it needs.
fn shift(pinned: NaiveDateTime, offset_seconds: i32) -> Result<NaiveDateTime, DecodeError> {
    pinned
        .checked_add_signed(Duration::seconds(i64::from(offset_seconds)))
        .ok_or_else(|| {
            DecodeError::UnsupportedValueType(format!("offset {}s overflows", offset_seconds))
        })
}

fn extract_time(local: &NaiveDateTime) -> Time {
    Time {
        hour: local.hour() as i8,
        minute: local.minute() as i8,
        sec: local.second() as i8,
        microsec: (local.nanosecond() / 1000) as i32,
    }
}

fn extract_datetime(local: &NaiveDateTime) -> DateTime {
    DateTime {
        year: local.year() as i16,
        month: local.month() as i8,
        day: local.day() as i8,
        hour: local.hour() as i8,
        minute: local.minute() as i8,
        sec: local.second() as i8,
        microsec: (local.nanosecond() / 1000) as i32,
    }
}
