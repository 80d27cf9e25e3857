use crate::error::AdslotError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use adslot_api_structs::check_availability::*;
use adslot_domain::{check_date, AvailabilityResult, DateKey, PostType, TimeOfDay, ID};
use adslot_infra::AdslotContext;

pub async fn check_availability_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AdslotContext>,
) -> Result<HttpResponse, AdslotError> {
    let query_params = query_params.0;
    let usecase = CheckAvailabilityUseCase {
        date: query_params.date,
        post_type: query_params.post_type,
        time: query_params.time,
        exclude_booking_id: query_params.exclude_booking_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|availability| HttpResponse::Ok().json(APIResponse::new(availability)))
        .map_err(AdslotError::from)
}

#[derive(Debug)]
pub struct CheckAvailabilityUseCase {
    pub date: String,
    pub post_type: String,
    pub time: Option<String>,
    pub exclude_booking_id: Option<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDate(String),
    InvalidPostType(String),
    InvalidTime(String),
    StorageError,
}

impl From<UseCaseError> for AdslotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "Invalid date: {}. Expected a date on the format YYYY-MM-DD",
                date
            )),
            UseCaseError::InvalidPostType(post_type) => {
                Self::BadClientData(format!("Invalid post type: {}", post_type))
            }
            UseCaseError::InvalidTime(time) => Self::BadClientData(format!(
                "Invalid time: {}. Expected a time on the format HH:MM:SS",
                time
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckAvailabilityUseCase {
    type Response = AvailabilityResult;

    type Error = UseCaseError;

    const NAME: &'static str = "CheckAvailability";

    async fn execute(&mut self, ctx: &AdslotContext) -> Result<Self::Response, Self::Error> {
        let date = DateKey::canonicalize(&self.date, ctx.config.timezone)
            .ok_or_else(|| UseCaseError::InvalidDate(self.date.clone()))?;
        let post_type = PostType::from_label(&self.post_type)
            .ok_or_else(|| UseCaseError::InvalidPostType(self.post_type.clone()))?;
        let time = match &self.time {
            Some(time) => Some(
                TimeOfDay::parse(time).ok_or_else(|| UseCaseError::InvalidTime(time.clone()))?,
            ),
            None => None,
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

        Ok(check_date(
            date,
            post_type,
            time,
            &bookings,
            settings.max_per_day,
            self.exclude_booking_id.as_ref(),
        ))
    }
}
