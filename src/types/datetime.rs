use chrono::{
    DateTime, MappedLocalTime, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::Tz;
use crate::property::Property;

lazy_static! {
    static ref RE_DATE: Regex =
        Regex::new(r"^(?<year>[0-9]{4})(?<month>[0-9]{2})(?<day>[0-9]{2})$").unwrap();
    static ref RE_DATETIME: Regex = Regex::new(
        r"^(?<year>[0-9]{4})(?<month>[0-9]{2})(?<day>[0-9]{2})T(?<hour>[0-9]{2})(?<minute>[0-9]{2})(?<second>[0-9]{2})(?<utc>Z)?$"
    )
    .unwrap();
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalDateTimeError {
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("Invalid datetime format: {0}")]
    InvalidDatetimeFormat(String),
    #[error("Date or time out of range: {0}")]
    OutOfRange(String),
}

fn field(captures: &Captures, name: &str) -> u32 {
    // The patterns only admit ASCII digits for every named group.
    captures[name].parse().unwrap_or_default()
}

fn naive_date(captures: &Captures, value: &str) -> Result<NaiveDate, CalDateTimeError> {
    let year = field(captures, "year") as i32;
    NaiveDate::from_ymd_opt(year, field(captures, "month"), field(captures, "day"))
        .ok_or_else(|| CalDateTimeError::OutOfRange(value.to_owned()))
}

fn naive_datetime(value: &str, utc: bool) -> Result<NaiveDateTime, CalDateTimeError> {
    let captures = RE_DATETIME
        .captures(value)
        .filter(|captures| captures.name("utc").is_some() == utc)
        .ok_or_else(|| CalDateTimeError::InvalidDatetimeFormat(value.to_owned()))?;
    let time = NaiveTime::from_hms_opt(
        field(&captures, "hour"),
        field(&captures, "minute"),
        field(&captures, "second"),
    )
    .ok_or_else(|| CalDateTimeError::OutOfRange(value.to_owned()))?;
    Ok(naive_date(&captures, value)?.and_time(time))
}

fn localize(
    naive: NaiveDateTime,
    tz: Tz,
    value: &str,
) -> Result<DateTime<Tz>, CalDateTimeError> {
    match tz.from_local_datetime(&naive) {
        MappedLocalTime::Single(dt) | MappedLocalTime::Ambiguous(dt, _) => Ok(dt),
        MappedLocalTime::None => {
            // Wall-clock time inside a gap: apply the offset in effect before
            // the transition, which moves it forward by the length of the gap.
            let before = tz
                .offset_from_utc_datetime(&(naive - TimeDelta::days(1)))
                .fix();
            tracing::debug!(value, tz = tz.name(), offset = %before, "Local time falls into a gap");
            naive
                .checked_sub_signed(TimeDelta::seconds(before.local_minus_utc().into()))
                .map(|utc| tz.from_utc_datetime(&utc))
                .ok_or_else(|| CalDateTimeError::OutOfRange(value.to_owned()))
        }
    }
}

/// Parse a `YYYYMMDDTHHMMSSZ` value.
pub fn parse_utc_datetime(value: &str) -> Result<DateTime<Tz>, CalDateTimeError> {
    let naive = naive_datetime(value, true)?;
    Ok(Tz::UTC.from_utc_datetime(&naive))
}

/// Parse a floating `YYYYMMDDTHHMMSS` value as wall-clock time in `tz`.
pub fn parse_local_datetime(value: &str, tz: Tz) -> Result<DateTime<Tz>, CalDateTimeError> {
    localize(naive_datetime(value, false)?, tz, value)
}

/// Parse a `YYYYMMDD` value as midnight in `tz`.
pub fn parse_date(value: &str, tz: Tz) -> Result<DateTime<Tz>, CalDateTimeError> {
    let captures = RE_DATE
        .captures(value)
        .ok_or_else(|| CalDateTimeError::InvalidDateFormat(value.to_owned()))?;
    localize(naive_date(&captures, value)?.and_time(NaiveTime::MIN), tz, value)
}

/// Turn a DTSTAMP/DTSTART/DTEND style property into a timestamp.
///
/// A trailing `Z` means UTC. Otherwise a `TZID` parameter names the zone
/// (unknown zones fall back to UTC), and without one the value is read in
/// `default_tz`. Eight character values are bare dates at midnight, which
/// also covers every well formed `VALUE=DATE` property.
pub fn parse_date_property(
    prop: &Property,
    default_tz: Tz,
) -> Result<DateTime<Tz>, CalDateTimeError> {
    let value = prop.value.as_str();
    if value.ends_with('Z') {
        return parse_utc_datetime(value);
    }
    if let Some(tzid) = prop.params.get_tzid() {
        let tz = Tz::from_tzid(tzid).unwrap_or_else(|| {
            tracing::warn!(tzid, "Unknown TZID, falling back to UTC");
            Tz::UTC
        });
        return parse_local_datetime(value, tz);
    }
    // Well formed VALUE=DATE values (`Params::get_value_type`) always take this branch
    if value.len() == 8 {
        return parse_date(value, default_tz);
    }
    parse_local_datetime(value, default_tz)
}
