use adslot_domain::{
    Booking, BookingStatus, CustomDate, DateKey, LeadTime, PostType, TimeOfDay, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDTO {
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

impl BookingDTO {
    pub fn new(booking: Booking) -> Self {
        Self {
            id: booking.id.clone(),
            ad_name: booking.ad_name,
            advertiser_name: booking.advertiser_name,
            advertiser_email: booking.advertiser_email,
            post_type: booking.post_type,
            date: booking.date,
            time: booking.time,
            date_from: booking.date_from,
            date_to: booking.date_to,
            custom_dates: booking.custom_dates,
            status: booking.status,
            lead_time: booking.lead_time,
            created: booking.created,
            updated: booking.updated,
        }
    }
}

/// A custom schedule entry as it arrives over the wire: either a bare date
/// string or an object carrying its own time.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum CustomDateInput {
    Date(String),
    DateAndTime {
        date: String,
        time: Option<String>,
    },
}

impl CustomDateInput {
    pub fn date(&self) -> &str {
        match self {
            Self::Date(date) => date,
            Self::DateAndTime { date, .. } => date,
        }
    }

    pub fn time(&self) -> Option<&str> {
        match self {
            Self::Date(_) => None,
            Self::DateAndTime { time, .. } => time.as_deref(),
        }
    }
}
