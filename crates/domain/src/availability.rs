use crate::booking::{Booking, PostType};
use crate::date::{DateKey, TimeOfDay};
use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The shared daily capacity limit. A calendar date can hold at most
/// `max_per_day` countable bookings, regardless of their schedule shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityConfig {
    pub max_per_day: usize,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self { max_per_day: 3 }
    }
}

/// Outcome of a single-date availability check, with enough structure for a
/// caller to render a precise rejection reason (day full vs time taken).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub date: DateKey,
    pub available: bool,
    pub day_full: bool,
    pub time_blocked: bool,
    pub occupancy: usize,
    pub cap: usize,
    pub booked_times: Vec<TimeOfDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOccupancy {
    pub date: DateKey,
    pub occupancy: usize,
    pub cap: usize,
    pub full: bool,
}

/// Checks one candidate date against a snapshot of countable bookings.
///
/// Capacity is date-scoped: a date is full once `cap` countable bookings
/// occupy it, whatever their shapes. Only for a one-time candidate with an
/// explicit time is the exact time-of-day additionally required to be free
/// among the other one-time bookings on that date. `exclude` removes a
/// booking from the snapshot so an edit never conflicts with itself.
pub fn check_date(
    date: DateKey,
    post_type: PostType,
    time: Option<TimeOfDay>,
    bookings: &[Booking],
    cap: usize,
    exclude: Option<&ID>,
) -> AvailabilityResult {
    let others = bookings
        .iter()
        .filter(|booking| exclude.map_or(true, |id| booking.id != *id))
        .collect::<Vec<_>>();

    let occupancy = others
        .iter()
        .filter(|booking| booking.occupied_dates().contains(&date))
        .count();
    let day_full = occupancy >= cap;

    let mut booked_times = Vec::new();
    let mut time_blocked = false;
    if post_type == PostType::OneTime {
        booked_times = others
            .iter()
            .filter(|booking| {
                booking.post_type == PostType::OneTime && booking.date == Some(date)
            })
            .filter_map(|booking| booking.time)
            .collect::<Vec<_>>();
        booked_times.sort();
        booked_times.dedup();
        if let Some(candidate) = time {
            time_blocked = booked_times.contains(&candidate);
        }
    }

    AvailabilityResult {
        date,
        available: !day_full && !time_blocked,
        day_full,
        time_blocked,
        occupancy,
        cap,
        booked_times,
    }
}

/// Per-date occupancy for a batch of candidate dates, used for daily-run and
/// custom-schedule candidates and for painting blocked days on a calendar.
/// No time-slot check here. Input order is preserved, duplicates collapsed.
pub fn day_occupancy(
    dates: &[DateKey],
    bookings: &[Booking],
    cap: usize,
    exclude: Option<&ID>,
) -> Vec<DayOccupancy> {
    let mut requested = Vec::new();
    let mut counts: HashMap<DateKey, usize> = HashMap::new();
    for date in dates {
        if counts.insert(*date, 0).is_none() {
            requested.push(*date);
        }
    }

    for booking in bookings {
        if exclude.map_or(false, |id| booking.id == *id) {
            continue;
        }
        for date in booking.occupied_dates() {
            if let Some(count) = counts.get_mut(&date) {
                *count += 1;
            }
        }
    }

    requested
        .into_iter()
        .map(|date| {
            let occupancy = counts[&date];
            DayOccupancy {
                date,
                occupancy,
                cap,
                full: occupancy >= cap,
            }
        })
        .collect()
}
