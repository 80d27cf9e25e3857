use adslot_domain::{AvailabilityResult, DateKey, DayOccupancy, TimeOfDay};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDTO {
    pub date: DateKey,
    pub available: bool,
    pub day_full: bool,
    pub time_blocked: bool,
    pub occupancy: usize,
    pub cap: usize,
    pub booked_times: Vec<TimeOfDay>,
}

impl AvailabilityDTO {
    pub fn new(result: AvailabilityResult) -> Self {
        Self {
            date: result.date,
            available: result.available,
            day_full: result.day_full,
            time_blocked: result.time_blocked,
            occupancy: result.occupancy,
            cap: result.cap,
            booked_times: result.booked_times,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DayOccupancyDTO {
    pub date: DateKey,
    pub occupancy: usize,
    pub cap: usize,
    pub full: bool,
}

impl DayOccupancyDTO {
    pub fn new(day: DayOccupancy) -> Self {
        Self {
            date: day.date,
            occupancy: day.occupancy,
            cap: day.cap,
            full: day.full,
        }
    }
}
