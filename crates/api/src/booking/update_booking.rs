use super::subscribers::InvalidateLedgerOnScheduleChange;
use crate::error::AdslotError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use adslot_api_structs::update_booking::*;
use adslot_domain::{
    check_date, day_occupancy, Booking, BookingStatus, CustomDate, DateKey, LeadTime, PostType,
    TimeOfDay, ID,
};
use adslot_infra::AdslotContext;

pub async fn update_booking_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AdslotContext>,
) -> Result<HttpResponse, AdslotError> {
    let body = body.0;
    let usecase = UpdateBookingUseCase {
        booking_id: path_params.booking_id.clone(),
        ad_name: body.ad_name,
        advertiser_name: body.advertiser_name,
        advertiser_email: body.advertiser_email,
        post_type: body.post_type,
        date: body.date,
        time: body.time,
        date_from: body.date_from,
        date_to: body.date_to,
        custom_dates: body.custom_dates.map(|entries| {
            entries
                .iter()
                .map(|entry| (entry.date().to_string(), entry.time().map(|t| t.to_string())))
                .collect()
        }),
        lead_time: body.lead_time,
        status: body.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.booking)))
        .map_err(AdslotError::from)
}

#[derive(Debug)]
pub struct UpdateBookingUseCase {
    pub booking_id: ID,
    pub ad_name: Option<String>,
    pub advertiser_name: Option<String>,
    pub advertiser_email: Option<String>,
    pub post_type: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub custom_dates: Option<Vec<(String, Option<String>)>>,
    pub lead_time: Option<LeadTime>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug)]
pub struct UpdatedBooking {
    pub booking: Booking,
    /// A changed schedule means previously recorded "already notified"
    /// ledger state no longer corresponds to a real occurrence, so the
    /// subscriber invalidates it.
    pub schedule_changed: bool,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
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
            UseCaseError::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
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
impl UseCase for UpdateBookingUseCase {
    type Response = UpdatedBooking;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateBooking";

    async fn execute(&mut self, ctx: &AdslotContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;
        let mut booking = ctx
            .repos
            .bookings
            .find(&self.booking_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.booking_id.clone()))?;
        let before = booking.clone();

        if let Some(ad_name) = &self.ad_name {
            booking.ad_name = ad_name.clone();
        }
        if let Some(advertiser_name) = &self.advertiser_name {
            booking.advertiser_name = advertiser_name.clone();
        }
        if let Some(advertiser_email) = &self.advertiser_email {
            booking.advertiser_email = Some(advertiser_email.clone());
        }
        if let Some(post_type) = &self.post_type {
            booking.post_type = PostType::from_label(post_type)
                .ok_or_else(|| UseCaseError::InvalidPostType(post_type.clone()))?;
        }
        if let Some(time) = &self.time {
            booking.time = Some(
                TimeOfDay::parse(time).ok_or_else(|| UseCaseError::InvalidTime(time.clone()))?,
            );
        }
        if let Some(date) = &self.date {
            booking.date = Some(
                DateKey::canonicalize(date, tz)
                    .ok_or_else(|| UseCaseError::InvalidDate(date.clone()))?,
            );
        }
        if let Some(date_from) = &self.date_from {
            booking.date_from = Some(
                DateKey::canonicalize(date_from, tz)
                    .ok_or_else(|| UseCaseError::InvalidDate(date_from.clone()))?,
            );
        }
        if let Some(date_to) = &self.date_to {
            booking.date_to = Some(
                DateKey::canonicalize(date_to, tz)
                    .ok_or_else(|| UseCaseError::InvalidDate(date_to.clone()))?,
            );
        }
        if let Some(entries) = &self.custom_dates {
            let mut custom_dates = Vec::new();
            for (raw_date, raw_time) in entries {
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
            booking.custom_dates = custom_dates;
        }
        if let Some(lead_time) = self.lead_time {
            booking.lead_time = lead_time;
        }
        if let Some(status) = self.status {
            booking.status = status;
        }

        // The shape invariants must still hold for the final post type
        match booking.post_type {
            PostType::OneTime => {
                if booking.date.is_none() {
                    return Err(UseCaseError::MissingField("date"));
                }
            }
            PostType::DailyRun => match (booking.date_from, booking.date_to) {
                (Some(from), Some(to)) => {
                    if from > to {
                        return Err(UseCaseError::InvalidDateRange(from, to));
                    }
                }
                (None, _) => return Err(UseCaseError::MissingField("dateFrom")),
                (_, None) => return Err(UseCaseError::MissingField("dateTo")),
            },
            PostType::CustomSchedule => {
                if booking.custom_dates.is_empty() {
                    return Err(UseCaseError::EmptyCustomSchedule);
                }
            }
        }

        // Re-validate availability against everyone else. The booking is
        // excluded from the snapshot so it never conflicts with itself.
        if booking.status.is_countable() {
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

            match booking.post_type {
                PostType::OneTime => {
                    if let Some(date) = booking.date {
                        let res = check_date(
                            date,
                            booking.post_type,
                            booking.time,
                            &bookings,
                            settings.max_per_day,
                            Some(&booking.id),
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
                    let blocked = day_occupancy(
                        &occupied,
                        &bookings,
                        settings.max_per_day,
                        Some(&booking.id),
                    )
                    .into_iter()
                    .filter(|day| day.full)
                    .map(|day| day.date)
                    .collect::<Vec<_>>();
                    if !blocked.is_empty() {
                        return Err(UseCaseError::DatesBlocked(blocked));
                    }
                }
            }
        }

        booking.updated = ctx.sys.get_timestamp_millis();
        ctx.repos
            .bookings
            .save(&booking)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let schedule_changed = !before.same_schedule(&booking);
        Ok(UpdatedBooking {
            booking,
            schedule_changed,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(InvalidateLedgerOnScheduleChange)]
    }
}
