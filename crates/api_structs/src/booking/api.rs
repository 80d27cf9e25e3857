use crate::dtos::{BookingDTO, CustomDateInput};
use adslot_domain::{Booking, BookingStatus, LeadTime, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking: BookingDTO,
}

impl BookingResponse {
    pub fn new(booking: Booking) -> Self {
        Self {
            booking: BookingDTO::new(booking),
        }
    }
}

pub mod create_booking {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub ad_name: String,
        pub advertiser_name: String,
        pub advertiser_email: Option<String>,
        pub post_type: String,
        pub date: Option<String>,
        pub time: Option<String>,
        pub date_from: Option<String>,
        pub date_to: Option<String>,
        pub custom_dates: Option<Vec<CustomDateInput>>,
        pub lead_time: Option<LeadTime>,
    }

    pub type APIResponse = BookingResponse;
}

pub mod get_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    pub type APIResponse = BookingResponse;
}

pub mod update_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub ad_name: Option<String>,
        pub advertiser_name: Option<String>,
        pub advertiser_email: Option<String>,
        pub post_type: Option<String>,
        pub date: Option<String>,
        pub time: Option<String>,
        pub date_from: Option<String>,
        pub date_to: Option<String>,
        pub custom_dates: Option<Vec<CustomDateInput>>,
        pub lead_time: Option<LeadTime>,
        pub status: Option<BookingStatus>,
    }

    pub type APIResponse = BookingResponse;
}

pub mod delete_booking {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub booking_id: ID,
    }

    pub type APIResponse = BookingResponse;
}
