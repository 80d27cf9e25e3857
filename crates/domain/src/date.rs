use chrono::prelude::*;
use chrono_tz::Tz;
use serde::{de::Visitor, Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month {
        1 => 31,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 => 31,
        4 => 30,
        5 => 31,
        6 => 30,
        7 => 31,
        8 => 31,
        9 => 30,
        10 => 31,
        11 => 30,
        12 => 31,
        _ => panic!("Invalid month"),
    }
}

fn parse_ymd(datestr: &str) -> anyhow::Result<(i32, u32, u32)> {
    let dates = datestr.split('-').collect::<Vec<_>>();
    if dates.len() != 3 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }
    let year = dates[0].parse();
    let month = dates[1].parse();
    let day = dates[2].parse();

    if year.is_err() || month.is_err() || day.is_err() {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    let year = year.unwrap();
    let month = month.unwrap();
    let day = day.unwrap();
    if !(1970..=2100).contains(&year) || month < 1 || month > 12 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    let month_length = get_month_length(year, month);

    if day < 1 || day > month_length {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    Ok((year, month, day))
}

/// A calendar date in the fixed application timezone, the canonical
/// `YYYY-MM-DD` form that all capacity counting and occurrence math agree on.
/// Never compare raw date strings or instants directly, always go through
/// this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    year: i32,
    month: u32,
    day: u32,
}

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1970..=2100).contains(&year) || month < 1 || month > 12 {
            return None;
        }
        if day < 1 || day > get_month_length(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Parses a plain `YYYY-MM-DD` date, rejecting impossible calendar dates.
    pub fn parse(datestr: &str) -> Option<Self> {
        let (year, month, day) = parse_ymd(datestr.trim()).ok()?;
        Some(Self { year, month, day })
    }

    /// Normalizes a date-like input to its calendar date in `tz`. Accepts a
    /// plain date, an RFC 3339 datetime (converted into `tz` first so the
    /// stored key agrees with "today" no matter the instant-of-day it was
    /// written at) or a naive ISO datetime.
    pub fn canonicalize(raw: &str, tz: Tz) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(date) = Self::parse(raw) {
            return Some(date);
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::from_datetime(&datetime.with_timezone(&tz)));
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Self::new(datetime.year(), datetime.month(), datetime.day());
        }
        None
    }

    pub fn from_datetime(datetime: &DateTime<Tz>) -> Self {
        Self {
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
        }
    }

    /// The calendar date of `timestamp_millis` in `tz`.
    pub fn from_timestamp(timestamp_millis: i64, tz: Tz) -> Self {
        Self::from_datetime(&tz.timestamp_millis(timestamp_millis))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The next calendar day.
    pub fn succ(self) -> Self {
        let (mut year, mut month, mut day) = (self.year, self.month, self.day + 1);
        if day > get_month_length(year, month) {
            day = 1;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        Self { year, month, day }
    }

    /// Every calendar date from `from` to `to`, walking day by day, both
    /// endpoints included. Empty when `from > to`.
    pub fn expand_range(from: DateKey, to: DateKey) -> Vec<DateKey> {
        let mut dates = Vec::new();
        let mut cursor = from;
        while cursor <= to {
            dates.push(cursor);
            cursor = cursor.succ();
        }
        dates
    }

    /// The local wall-clock instant `date + time` in `tz`, in epoch millis.
    /// `None` when the local time does not exist (DST gap).
    pub fn and_time(&self, time: &TimeOfDay, tz: Tz) -> Option<i64> {
        let date = match tz.ymd_opt(self.year, self.month, self.day) {
            chrono::LocalResult::Single(date) => date,
            _ => return None,
        };
        date.and_hms_opt(time.hour(), time.minute(), time.second())
            .map(|datetime| datetime.timestamp_millis())
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Error, Debug)]
pub enum InvalidDateError {
    #[error("Date: {0} is malformed")]
    Malformed(String),
}

impl FromStr for DateKey {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidDateError::Malformed(s.to_string()))
    }
}

impl Serialize for DateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DateKeyVisitor;

        impl<'de> Visitor<'de> for DateKeyVisitor {
            type Value = DateKey;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A date on the format YYYY-MM-DD")
            }

            fn visit_str<E>(self, value: &str) -> Result<DateKey, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<DateKey>()
                    .map_err(|_| E::custom(format!("Malformed date: {}", value)))
            }
        }

        deserializer.deserialize_str(DateKeyVisitor)
    }
}

/// A wall-clock time of day. The `HH:MM:SS` display form is the normalized
/// comparison form used for time-slot conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
    second: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(Self {
            hour,
            minute,
            second,
        })
    }

    /// Accepts `H:MM`, `HH:MM` and `HH:MM:SS`.
    pub fn parse(timestr: &str) -> Option<Self> {
        let parts = timestr.trim().split(':').collect::<Vec<_>>();
        if parts.len() != 2 && parts.len() != 3 {
            return None;
        }
        let hour = parts[0].parse().ok()?;
        let minute = parts[1].parse().ok()?;
        let second = if parts.len() == 3 {
            parts[2].parse().ok()?
        } else {
            0
        };
        Self::new(hour, minute, second)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[derive(Error, Debug)]
pub enum InvalidTimeError {
    #[error("Time: {0} is malformed")]
    Malformed(String),
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidTimeError::Malformed(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeOfDayVisitor;

        impl<'de> Visitor<'de> for TimeOfDayVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A time on the format HH:MM:SS")
            }

            fn visit_str<E>(self, value: &str) -> Result<TimeOfDay, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<TimeOfDay>()
                    .map_err(|_| E::custom(format!("Malformed time: {}", value)))
            }
        }

        deserializer.deserialize_str(TimeOfDayVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono_tz::UTC;

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec![
            "2018-1-1",
            "2025-12-31",
            "2020-1-12",
            "2020-2-29",
            "2020-02-2",
            "2020-02-02",
            "2020-2-09",
        ];

        for date in &valid_dates {
            assert!(DateKey::parse(date).is_some());
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "2018--1-1",
            "2020-1-32",
            "2020-2-30",
            "2021-2-29",
            "2020-0-1",
            "2020-1-0",
            "totally not a date",
            "",
        ];

        for date in &invalid_dates {
            assert!(DateKey::parse(date).is_none());
        }
    }

    #[test]
    fn it_canonicalizes_datetimes_into_the_zone() {
        let tz: Tz = "America/New_York".parse().unwrap();

        // Late evening UTC is still the previous day in New York
        let date = DateKey::canonicalize("2024-07-05T01:30:00+00:00", tz).unwrap();
        assert_eq!(date.to_string(), "2024-07-04");

        let date = DateKey::canonicalize("2024-07-05", tz).unwrap();
        assert_eq!(date.to_string(), "2024-07-05");

        let date = DateKey::canonicalize("2024-07-05T10:00:00", tz).unwrap();
        assert_eq!(date.to_string(), "2024-07-05");

        assert!(DateKey::canonicalize("", tz).is_none());
        assert!(DateKey::canonicalize("gibberish", tz).is_none());
    }

    #[test]
    fn it_walks_days_across_month_and_leap_boundaries() {
        let date = DateKey::parse("2020-2-28").unwrap();
        assert_eq!(date.succ().to_string(), "2020-02-29");
        assert_eq!(date.succ().succ().to_string(), "2020-03-01");

        let date = DateKey::parse("2021-12-31").unwrap();
        assert_eq!(date.succ().to_string(), "2022-01-01");
    }

    #[test]
    fn it_expands_inclusive_ranges() {
        let from = DateKey::parse("2024-06-01").unwrap();
        let to = DateKey::parse("2024-06-03").unwrap();
        let dates = DateKey::expand_range(from, to)
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2024-06-01", "2024-06-02", "2024-06-03"]);

        assert_eq!(DateKey::expand_range(from, from).len(), 1);
        assert!(DateKey::expand_range(to, from).is_empty());
    }

    #[test]
    fn it_builds_local_instants() {
        let date = DateKey::parse("2024-06-01").unwrap();
        let time = TimeOfDay::parse("12:00:00").unwrap();
        let ts = date.and_time(&time, UTC).unwrap();
        assert_eq!(
            ts,
            chrono::Utc
                .ymd(2024, 6, 1)
                .and_hms(12, 0, 0)
                .timestamp_millis()
        );
    }

    #[test]
    fn it_normalizes_times() {
        assert_eq!(TimeOfDay::parse("9:00").unwrap().to_string(), "09:00:00");
        assert_eq!(TimeOfDay::parse("09:00").unwrap().to_string(), "09:00:00");
        assert_eq!(
            TimeOfDay::parse("23:59:59").unwrap().to_string(),
            "23:59:59"
        );
        assert!(TimeOfDay::parse("24:00").is_none());
        assert!(TimeOfDay::parse("10:60").is_none());
        assert!(TimeOfDay::parse("10").is_none());
        assert!(TimeOfDay::parse("").is_none());
    }
}
