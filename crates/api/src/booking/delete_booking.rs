use super::subscribers::InvalidateLedgerOnBookingDeleted;
use crate::error::AdslotError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use adslot_api_structs::delete_booking::*;
use adslot_domain::{Booking, ID};
use adslot_infra::AdslotContext;

pub async fn delete_booking_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AdslotContext>,
) -> Result<HttpResponse, AdslotError> {
    let usecase = DeleteBookingUseCase {
        booking_id: path_params.booking_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|booking| HttpResponse::Ok().json(APIResponse::new(booking)))
        .map_err(AdslotError::from)
}

#[derive(Debug)]
pub struct DeleteBookingUseCase {
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
impl UseCase for DeleteBookingUseCase {
    type Response = Booking;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteBooking";

    async fn execute(&mut self, ctx: &AdslotContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .bookings
            .delete(&self.booking_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.booking_id.clone()))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(InvalidateLedgerOnBookingDeleted)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::booking::create_booking::CreateBookingUseCase;
    use adslot_domain::{Channel, RecipientKind, ReminderLedgerEntry};
    use adslot_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn deleting_a_booking_also_invalidates_its_ledger() {
        let ctx = setup_context();
        let usecase = CreateBookingUseCase {
            ad_name: "Morning spot".into(),
            advertiser_name: "Acme".into(),
            advertiser_email: None,
            post_type: "one_time".into(),
            date: Some("2024-07-04".into()),
            time: Some("09:00:00".into()),
            date_from: None,
            date_to: None,
            custom_dates: Vec::new(),
            lead_time: None,
        };
        let booking = execute(usecase, &ctx).await.unwrap();

        ctx.repos
            .ledger
            .insert(&ReminderLedgerEntry {
                id: Default::default(),
                booking_id: booking.id.clone(),
                recipient: RecipientKind::Advertiser,
                channel: Channel::Email,
                sent_at: 100,
            })
            .await
            .unwrap();

        let usecase = DeleteBookingUseCase {
            booking_id: booking.id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        assert!(ctx.repos.bookings.find(&booking.id).await.is_none());
        assert!(ctx
            .repos
            .ledger
            .find_sent_after(&booking.id, RecipientKind::Advertiser, Channel::Email, 0)
            .await
            .is_none());
    }

    #[actix_web::main]
    #[test]
    async fn unknown_booking_is_not_found() {
        let ctx = setup_context();
        let usecase = DeleteBookingUseCase {
            booking_id: ID::default(),
        };
        let booking_id = usecase.booking_id.clone();
        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(booking_id));
    }
}
