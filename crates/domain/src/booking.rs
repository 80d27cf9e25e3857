use crate::date::{DateKey, TimeOfDay};
use crate::reminder::LeadTime;
use crate::shared::entity::{Entity, ID};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The three schedule shapes a placement can be booked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    OneTime,
    DailyRun,
    CustomSchedule,
}

impl PostType {
    /// Maps free-form labels ("One-Time Post", "daily_run", "Custom
    /// Schedule") to a canonical variant, ignoring case, whitespace and
    /// punctuation. Unrecognized labels are rejected rather than coerced to
    /// a single-date booking.
    pub fn from_label(raw: &str) -> Option<Self> {
        let label = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if label.is_empty() {
            return None;
        }
        if label.contains("daily") {
            return Some(Self::DailyRun);
        }
        if label.contains("custom") {
            return Some(Self::CustomSchedule);
        }
        if label.contains("onetime") {
            return Some(Self::OneTime);
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Scheduled,
    Archived,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    /// Whether the booking participates in daily capacity math. Archived,
    /// cancelled and rejected bookings never block a date.
    pub fn is_countable(&self) -> bool {
        matches!(self, Self::Pending | Self::Scheduled)
    }

    /// Whether the booking is eligible for reminder dispatch.
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled)
    }
}

/// One entry of a custom schedule. The entry time falls back to the
/// booking-level time when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDate {
    pub date: DateKey,
    pub time: Option<TimeOfDay>,
}

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: ID,
    pub ad_name: String,
    pub advertiser_name: String,
    pub advertiser_email: Option<String>,
    pub post_type: PostType,
    pub date: Option<DateKey>,
    pub time: Option<TimeOfDay>,
    pub date_from: Option<DateKey>,
    pub date_to: Option<DateKey>,
    pub custom_dates: Vec<CustomDate>,
    pub status: BookingStatus,
    pub lead_time: LeadTime,
    pub created: i64,
    pub updated: i64,
}

impl Entity for Booking {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Booking {
    /// The calendar dates this booking occupies. This is the single shared
    /// primitive behind both capacity counting and occurrence computation,
    /// so "what dates does this booking cover" only ever has one answer.
    pub fn occupied_dates(&self) -> Vec<DateKey> {
        match self.post_type {
            PostType::OneTime => self.date.into_iter().collect(),
            PostType::DailyRun => match (self.date_from, self.date_to) {
                (Some(from), Some(to)) => DateKey::expand_range(from, to),
                _ => Vec::new(),
            },
            PostType::CustomSchedule => {
                let mut dates = self
                    .custom_dates
                    .iter()
                    .map(|entry| entry.date)
                    .collect::<Vec<_>>();
                dates.sort();
                dates.dedup();
                dates
            }
        }
    }

    /// The concrete instants this booking is due to occur at, evaluated
    /// relative to `today`. A daily run yields exactly one occurrence per
    /// active day, the current one, never future days of the run. Entries
    /// without a resolvable time produce no occurrence.
    pub fn occurrences(&self, today: DateKey, tz: Tz) -> Vec<i64> {
        match self.post_type {
            PostType::OneTime => match (self.date, self.time) {
                (Some(date), Some(time)) => date.and_time(&time, tz).into_iter().collect(),
                _ => Vec::new(),
            },
            PostType::DailyRun => match (self.date_from, self.date_to, self.time) {
                (Some(from), Some(to), Some(time)) if from <= today && today <= to => {
                    today.and_time(&time, tz).into_iter().collect()
                }
                _ => Vec::new(),
            },
            PostType::CustomSchedule => self
                .custom_dates
                .iter()
                .filter_map(|entry| {
                    let time = entry.time.or(self.time)?;
                    entry.date.and_time(&time, tz)
                })
                .collect(),
        }
    }

    /// Whether the schedule fields agree with `other`. Used to decide if a
    /// previously recorded reminder ledger still corresponds to a real
    /// occurrence after an edit.
    pub fn same_schedule(&self, other: &Self) -> bool {
        self.post_type == other.post_type
            && self.date == other.date
            && self.time == other.time
            && self.date_from == other.date_from
            && self.date_to == other.date_to
            && self.custom_dates == other.custom_dates
    }
}
