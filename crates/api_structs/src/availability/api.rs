use crate::dtos::{AvailabilityDTO, DayOccupancyDTO};
use adslot_domain::{AvailabilityResult, DayOccupancy, ID};
use serde::{Deserialize, Serialize};

pub mod check_availability {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub date: String,
        pub post_type: String,
        pub time: Option<String>,
        pub exclude_booking_id: Option<ID>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub availability: AvailabilityDTO,
    }

    impl APIResponse {
        pub fn new(result: AvailabilityResult) -> Self {
            Self {
                availability: AvailabilityDTO::new(result),
            }
        }
    }
}

pub mod check_availability_batch {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub dates: Option<Vec<String>>,
        pub date_from: Option<String>,
        pub date_to: Option<String>,
        pub exclude_booking_id: Option<ID>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub days: Vec<DayOccupancyDTO>,
    }

    impl APIResponse {
        pub fn new(days: Vec<DayOccupancy>) -> Self {
            Self {
                days: days.into_iter().map(DayOccupancyDTO::new).collect(),
            }
        }
    }
}
