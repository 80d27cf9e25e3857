use crate::error::AdslotError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use adslot_api_structs::create_booking::*;
use adslot_domain::{
    check_date, day_occupancy, Booking, BookingStatus, CustomDate, DateKey, LeadTime, PostType,
    TimeOfDay,
};
use adslot_infra::AdslotContext;

pub async fn create_booking_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AdslotContext>,
) -> Result<HttpResponse, AdslotError> {
    let body = body.0;
    let usecase = CreateBookingUseCase {
        ad_name: body.ad_name,
        advertiser_name: body.advertiser_name,
        advertiser_email: body.advertiser_email,
        post_type: body.post_type,
        date: body.date,
        time: body.time,
        date_from: body.date_from,
        date_to: body.date_to,
        custom_dates: body
            .custom_dates
            .unwrap_or_default()
            .iter()
            .map(|entry| (entry.date().to_string(), entry.time().map(|t| t.to_string())))
            .collect(),
        lead_time: body.lead_time,
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Created().json(APIResponse::new(booking)))
        .map_err(AdslotError::from)
}

#[derive(Debug)]
pub struct CreateBookingUseCase {
    pub ad_name: String,
    pub advertiser_name: String,
    pub advertiser_email: Option<String>,
    pub post_type: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub custom_dates: Vec<(String, Option<String>)>,
    pub lead_time: Option<LeadTime>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidPostType(String),
    InvalidDate(String),
    InvalidTime(String),
    InvalidDateRange(DateKey, DateKey),
    MissingField(&'static str),
    EmptyCustomSchedule,
    DayFull(DateKey),
    TimeBlocked(DateKey, TimeOfDay),
    DatesBlocked(Vec<DateKey>),
    StorageError,
}

impl From<UseCaseError> for AdslotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidPostType(post_type) => {
                Self::BadClientData(format!("Invalid post type: {}", post_type))
            }
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "Invalid date: {}. Expected a date on the format YYYY-MM-DD",
                date
            )),
            UseCaseError::InvalidTime(time) => Self::BadClientData(format!(
                "Invalid time: {}. Expected a time on the format HH:MM:SS",
                time
            )),
            UseCaseError::InvalidDateRange(from, to) => Self::BadClientData(format!(
                "Invalid date range: dateFrom: {} is after dateTo: {}",
                from, to
            )),
            UseCaseError::MissingField(field) => {
                Self::BadClientData(format!("Missing required field: {}", field))
            }
            UseCaseError::EmptyCustomSchedule => {
                Self::BadClientData("A custom schedule needs at least one valid date".into())
            }
            UseCaseError::DayFull(date) => Self::Conflict(format!(
                "The date: {} has reached its daily booking capacity",
                date
            )),
            UseCaseError::TimeBlocked(date, time) => Self::Conflict(format!(
                "The time: {} on date: {} is already booked",
                time, date
            )),
            UseCaseError::DatesBlocked(dates) => Self::Conflict(format!(
                "The following dates have reached their daily booking capacity: {}",
                dates
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateBooking";

    async fn execute(&mut self, ctx: &AdslotContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;
        let post_type = PostType::from_label(&self.post_type)
            .ok_or_else(|| UseCaseError::InvalidPostType(self.post_type.clone()))?;
        let time = match &self.time {
            Some(time) => Some(
                TimeOfDay::parse(time).ok_or_else(|| UseCaseError::InvalidTime(time.clone()))?,
            ),
            None => None,
        };

        let mut date = None;
        let mut date_from = None;
        let mut date_to = None;
        let mut custom_dates = Vec::new();
        match post_type {
            PostType::OneTime => {
                let raw = self
                    .date
                    .as_ref()
                    .ok_or(UseCaseError::MissingField("date"))?;
                date = Some(
                    DateKey::canonicalize(raw, tz)
                        .ok_or_else(|| UseCaseError::InvalidDate(raw.clone()))?,
                );
            }
            PostType::DailyRun => {
                let raw_from = self
                    .date_from
                    .as_ref()
                    .ok_or(UseCaseError::MissingField("dateFrom"))?;
                let raw_to = self
                    .date_to
                    .as_ref()
                    .ok_or(UseCaseError::MissingField("dateTo"))?;
                let from = DateKey::canonicalize(raw_from, tz)
                    .ok_or_else(|| UseCaseError::InvalidDate(raw_from.clone()))?;
                let to = DateKey::canonicalize(raw_to, tz)
                    .ok_or_else(|| UseCaseError::InvalidDate(raw_to.clone()))?;
                if from > to {
                    return Err(UseCaseError::InvalidDateRange(from, to));
                }
                date_from = Some(from);
                date_to = Some(to);
            }
            PostType::CustomSchedule => {
                for (raw_date, raw_time) in &self.custom_dates {
                    // Entries that fail to canonicalize are dropped
                    let entry_date = match DateKey::canonicalize(raw_date, tz) {
                        Some(entry_date) => entry_date,
                        None => continue,
                    };
                    custom_dates.push(CustomDate {
                        date: entry_date,
                        time: raw_time.as_deref().and_then(TimeOfDay::parse),
                    });
                }
                if custom_dates.is_empty() {
                    return Err(UseCaseError::EmptyCustomSchedule);
                }
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let booking = Booking {
            id: Default::default(),
            ad_name: self.ad_name.clone(),
            advertiser_name: self.advertiser_name.clone(),
            advertiser_email: self.advertiser_email.clone(),
            post_type,
            date,
            time,
            date_from,
            date_to,
            custom_dates,
            status: BookingStatus::Pending,
            lead_time: self.lead_time.unwrap_or_default(),
            created: now,
            updated: now,
        };

        let settings = ctx
            .repos
            .settings
            .get()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let bookings = ctx
            .repos
            .bookings
            .find_countable()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        match post_type {
            PostType::OneTime => {
                if let Some(date) = booking.date {
                    let res = check_date(
                        date,
                        post_type,
                        booking.time,
                        &bookings,
                        settings.max_per_day,
                        None,
                    );
                    if res.day_full {
                        return Err(UseCaseError::DayFull(date));
                    }
                    if res.time_blocked {
                        if let Some(time) = booking.time {
                            return Err(UseCaseError::TimeBlocked(date, time));
                        }
                    }
                }
            }
            PostType::DailyRun | PostType::CustomSchedule => {
                let occupied = booking.occupied_dates();
                let blocked = day_occupancy(&occupied, &bookings, settings.max_per_day, None)
                    .into_iter()
                    .filter(|day| day.full)
                    .map(|day| day.date)
                    .collect::<Vec<_>>();
                if !blocked.is_empty() {
                    return Err(UseCaseError::DatesBlocked(blocked));
                }
            }
        }

        ctx.repos
            .bookings
            .insert(&booking)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(booking)
    }
}
