use crate::error::AdslotError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use adslot_api_structs::get_booking::*;
use adslot_domain::{Booking, ID};
use adslot_infra::AdslotContext;

pub async fn get_booking_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AdslotContext>,
) -> Result<HttpResponse, AdslotError> {
    let usecase = GetBookingUseCase {
        booking_id: path_params.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking)))
        .map_err(AdslotError::from)
}

#[derive(Debug)]
pub struct GetBookingUseCase {
    pub booking_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for AdslotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(booking_id) => Self::NotFound(format!(
                "The booking with id: {}, was not found.",
                booking_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "GetBooking";

    async fn execute(&mut self, ctx: &AdslotContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .bookings
            .find(&self.booking_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.booking_id.clone()))
    }
}
