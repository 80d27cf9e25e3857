use crate::error::AdslotError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use adslot_api_structs::check_availability_batch::*;
use adslot_domain::{day_occupancy, DateKey, DayOccupancy, ID};
use adslot_infra::AdslotContext;

pub async fn check_availability_batch_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AdslotContext>,
) -> Result<HttpResponse, AdslotError> {
    let body = body.0;
    let usecase = CheckAvailabilityBatchUseCase {
        dates: body.dates.unwrap_or_default(),
        date_from: body.date_from,
        date_to: body.date_to,
        exclude_booking_id: body.exclude_booking_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|days| HttpResponse::Ok().json(APIResponse::new(days)))
        .map_err(AdslotError::from)
}

/// Per-date occupancy for a set of candidate dates, either listed explicitly
/// or given as a range. Used before building a daily-run or custom-schedule
/// booking and for painting blocked days on a calendar month.
#[derive(Debug)]
pub struct CheckAvailabilityBatchUseCase {
    pub dates: Vec<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub exclude_booking_id: Option<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for AdslotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckAvailabilityBatchUseCase {
    type Response = Vec<DayOccupancy>;

    type Error = UseCaseError;

    const NAME: &'static str = "CheckAvailabilityBatch";

    async fn execute(&mut self, ctx: &AdslotContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;

        // Dates that fail to canonicalize are dropped, not errored: a batch
        // request answers "which of these days are blocked", it does not
        // gate a booking.
        let mut dates = self
            .dates
            .iter()
            .filter_map(|date| DateKey::canonicalize(date, tz))
            .collect::<Vec<_>>();
        if let (Some(from), Some(to)) = (&self.date_from, &self.date_to) {
            if let (Some(from), Some(to)) = (
                DateKey::canonicalize(from, tz),
                DateKey::canonicalize(to, tz),
            ) {
                dates.extend(DateKey::expand_range(from, to));
            }
        }

        if dates.is_empty() {
            return Ok(Vec::new());
        }

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

        Ok(day_occupancy(
            &dates,
            &bookings,
            settings.max_per_day,
            self.exclude_booking_id.as_ref(),
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use adslot_domain::{Booking, BookingStatus, CapacityConfig, LeadTime, PostType};
    use adslot_infra::setup_context;

    fn daily_run_booking(from: &str, to: &str) -> Booking {
        Booking {
            id: Default::default(),
            ad_name: "Week long run".into(),
            advertiser_name: "Acme".into(),
            advertiser_email: None,
            post_type: PostType::DailyRun,
            date: None,
            time: None,
            date_from: DateKey::parse(from),
            date_to: DateKey::parse(to),
            custom_dates: Vec::new(),
            status: BookingStatus::Pending,
            lead_time: LeadTime::default(),
            created: 0,
            updated: 0,
        }
    }

    #[actix_web::main]
    #[test]
    async fn counts_occupancy_for_a_range() {
        let ctx = setup_context();
        ctx.repos
            .settings
            .set(&CapacityConfig { max_per_day: 1 })
            .await
            .unwrap();
        ctx.repos
            .bookings
            .insert(&daily_run_booking("2024-06-02", "2024-06-03"))
            .await
            .unwrap();

        let usecase = CheckAvailabilityBatchUseCase {
            dates: Vec::new(),
            date_from: Some("2024-06-01".into()),
            date_to: Some("2024-06-04".into()),
            exclude_booking_id: None,
        };
        let days = execute(usecase, &ctx).await.unwrap();
        assert_eq!(days.len(), 4);
        assert!(!days[0].full);
        assert!(days[1].full);
        assert!(days[2].full);
        assert!(!days[3].full);
    }

    #[actix_web::main]
    #[test]
    async fn drops_unparseable_dates() {
        let ctx = setup_context();

        let usecase = CheckAvailabilityBatchUseCase {
            dates: vec!["2024-06-01".into(), "gibberish".into()],
            date_from: None,
            date_to: None,
            exclude_booking_id: None,
        };
        let days = execute(usecase, &ctx).await.unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date.to_string(), "2024-06-01");
    }

    #[actix_web::main]
    #[test]
    async fn empty_input_yields_empty_result() {
        let ctx = setup_context();

        let usecase = CheckAvailabilityBatchUseCase {
            dates: Vec::new(),
            date_from: None,
            date_to: None,
            exclude_booking_id: None,
        };
        let days = execute(usecase, &ctx).await.unwrap();
        assert!(days.is_empty());
    }
}
