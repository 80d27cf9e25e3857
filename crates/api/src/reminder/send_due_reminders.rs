use crate::error::AdslotError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use adslot_api_structs::send_due_reminders::*;
use adslot_domain::{
    is_due, Booking, Channel, DateKey, DispatchOutcome, DispatchReport, DispatchResult, LeadTime,
    RecipientKind, ReminderLedgerEntry, LEDGER_SUPPRESSION_MILLIS,
};
use adslot_infra::{AdslotContext, Notification};
use chrono::TimeZone;
use chrono_tz::Tz;
use tracing::{error, info};

pub async fn send_due_reminders_controller(
    ctx: web::Data<AdslotContext>,
) -> Result<HttpResponse, AdslotError> {
    let usecase = SendDueRemindersUseCase;

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(AdslotError::from)
}

/// One dispatch run. Stateless between runs: everything it needs is read
/// fresh from the store and the only thing it writes is ledger entries for
/// reminders that actually went out. A failed send writes nothing, so the
/// next run retries it.
#[derive(Debug)]
pub struct SendDueRemindersUseCase;

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

fn format_occurrence(occurrence: i64, tz: Tz) -> String {
    tz.timestamp_millis(occurrence)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Sends one reminder unless the ledger shows one went out for this
/// `(booking, recipient, channel)` within the last 24 hours. Channels are
/// ledgered independently, an email send never suppresses an SMS send.
async fn deliver(
    booking: &Booking,
    recipient: RecipientKind,
    channel: Channel,
    address: &str,
    occurrence: i64,
    lead_time: &LeadTime,
    now: i64,
    ctx: &AdslotContext,
) -> DispatchResult {
    let result = |outcome| DispatchResult {
        booking_id: booking.id.clone(),
        recipient,
        channel,
        outcome,
    };

    let suppression_window_start = now - LEDGER_SUPPRESSION_MILLIS;
    if ctx
        .repos
        .ledger
        .find_sent_after(&booking.id, recipient, channel, suppression_window_start)
        .await
        .is_some()
    {
        return result(DispatchOutcome::AlreadySent);
    }

    let notification = Notification {
        channel,
        address: address.to_string(),
        subject: format!("Upcoming ad placement: {}", booking.ad_name),
        body: format!(
            "{} for {} is scheduled at {} (reminder lead time: {}).",
            booking.ad_name,
            booking.advertiser_name,
            format_occurrence(occurrence, ctx.config.timezone),
            lead_time
        ),
    };

    match ctx.notifier.send(&notification).await {
        Ok(_) => {
            let entry = ReminderLedgerEntry {
                id: Default::default(),
                booking_id: booking.id.clone(),
                recipient,
                channel,
                sent_at: now,
            };
            if let Err(e) = ctx.repos.ledger.insert(&entry).await {
                // Worst case the next run sends a duplicate reminder
                error!(
                    "Failed to record reminder ledger entry for booking: {}: {:?}",
                    booking.id, e
                );
            }
            result(DispatchOutcome::Sent)
        }
        Err(e) => result(DispatchOutcome::Failed(e.to_string())),
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = DispatchReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &AdslotContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;
        let now = ctx.sys.get_timestamp_millis();
        let today = DateKey::from_timestamp(now, tz);

        let preferences = ctx
            .repos
            .preferences
            .find_by_recipient(RecipientKind::Operator)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let bookings = ctx
            .repos
            .bookings
            .find_scheduled()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut results = Vec::new();
        for booking in &bookings {
            let occurrences = booking.occurrences(today, tz);
            if occurrences.is_empty() {
                continue;
            }

            for preference in &preferences {
                let lead_minutes = preference.lead_time.in_minutes();
                let due = occurrences
                    .iter()
                    .copied()
                    .find(|occurrence| is_due(*occurrence, now, lead_minutes));
                let occurrence = match due {
                    Some(occurrence) => occurrence,
                    None => continue,
                };
                for channel in preference.enabled_channels() {
                    let address = match preference.address_for(channel) {
                        Some(address) => address.to_string(),
                        None => continue,
                    };
                    results.push(
                        deliver(
                            booking,
                            RecipientKind::Operator,
                            channel,
                            &address,
                            occurrence,
                            &preference.lead_time,
                            now,
                            ctx,
                        )
                        .await,
                    );
                }
            }

            // The advertiser reminder runs on the booking's own lead time
            // and only when there is an address to reach it at
            let lead_minutes = booking.lead_time.in_minutes();
            let due = occurrences
                .iter()
                .copied()
                .find(|occurrence| is_due(*occurrence, now, lead_minutes));
            if let (Some(occurrence), Some(address)) = (due, booking.advertiser_email.clone()) {
                results.push(
                    deliver(
                        booking,
                        RecipientKind::Advertiser,
                        Channel::Email,
                        &address,
                        occurrence,
                        &booking.lead_time,
                        now,
                        ctx,
                    )
                    .await,
                );
            }
        }

        let report = DispatchReport { results };
        info!(
            "Reminder dispatch run completed. sent: {}, failed: {}, total: {}",
            report.sent_count(),
            report.failed_count(),
            report.results.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use adslot_domain::{BookingStatus, LeadTimeUnit, NotificationPreference, PostType, TimeOfDay};
    use adslot_infra::{setup_context, ISys, InMemoryNotifier};
    use chrono::Utc;
    use std::sync::Arc;

    struct StaticTimeSys {
        timestamp_millis: i64,
    }
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.timestamp_millis
        }
    }

    // Sat Jun 15 2024 12:00:00 UTC
    fn fixed_now() -> i64 {
        Utc.ymd(2024, 6, 15).and_hms(12, 0, 0).timestamp_millis()
    }

    fn test_context(now: i64) -> (AdslotContext, Arc<InMemoryNotifier>) {
        let mut ctx = setup_context();
        ctx.config.timezone = chrono_tz::UTC;
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: now,
        });
        let notifier = Arc::new(InMemoryNotifier::new());
        ctx.notifier = notifier.clone();
        (ctx, notifier)
    }

    /// A scheduled one-time booking occurring 30 minutes from `fixed_now`
    fn due_booking() -> Booking {
        Booking {
            id: Default::default(),
            ad_name: "Morning spot".into(),
            advertiser_name: "Acme".into(),
            advertiser_email: Some("ads@acme.test".into()),
            post_type: PostType::OneTime,
            date: DateKey::parse("2024-06-15"),
            time: TimeOfDay::parse("12:30:00"),
            date_from: None,
            date_to: None,
            custom_dates: Vec::new(),
            status: BookingStatus::Scheduled,
            lead_time: LeadTime {
                amount: 1,
                unit: LeadTimeUnit::Hours,
            },
            created: 0,
            updated: 0,
        }
    }

    fn operator_preference(lead_minutes: i64) -> NotificationPreference {
        NotificationPreference {
            id: Default::default(),
            recipient: RecipientKind::Operator,
            email_enabled: true,
            sms_enabled: false,
            email_address: Some("ops@example.test".into()),
            phone_number: None,
            lead_time: LeadTime {
                amount: lead_minutes,
                unit: LeadTimeUnit::Minutes,
            },
        }
    }

    #[actix_web::main]
    #[test]
    async fn sends_to_operator_and_advertiser_when_due() {
        let now = fixed_now();
        let (ctx, notifier) = test_context(now);
        ctx.repos.bookings.insert(&due_booking()).await.unwrap();
        ctx.repos
            .preferences
            .insert(&operator_preference(60))
            .await
            .unwrap();

        let report = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.sent_count(), 2);
        assert_eq!(notifier.sent().len(), 2);

        let recipients = report
            .results
            .iter()
            .map(|r| r.recipient)
            .collect::<Vec<_>>();
        assert!(recipients.contains(&RecipientKind::Operator));
        assert!(recipients.contains(&RecipientKind::Advertiser));
    }

    #[actix_web::main]
    #[test]
    async fn second_run_within_24_hours_reports_already_sent() {
        let now = fixed_now();
        let (ctx, notifier) = test_context(now);
        ctx.repos.bookings.insert(&due_booking()).await.unwrap();
        ctx.repos
            .preferences
            .insert(&operator_preference(60))
            .await
            .unwrap();

        let first = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(first.sent_count(), 2);

        let second = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(second.sent_count(), 0);
        assert!(second
            .results
            .iter()
            .all(|r| r.outcome == DispatchOutcome::AlreadySent));
        // The sender was not invoked again
        assert_eq!(notifier.sent().len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn booking_outside_its_window_is_not_due() {
        let now = fixed_now();
        let (ctx, _) = test_context(now);
        let mut booking = due_booking();
        // Occurs in 30 min but the advertiser only wants a 10 min heads up
        booking.lead_time = LeadTime {
            amount: 10,
            unit: LeadTimeUnit::Minutes,
        };
        ctx.repos.bookings.insert(&booking).await.unwrap();

        let report = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert!(report.results.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn failed_sends_write_no_ledger_and_retry_next_run() {
        let now = fixed_now();
        let (ctx, notifier) = test_context(now);
        ctx.repos.bookings.insert(&due_booking()).await.unwrap();
        notifier.fail_sends("gateway unreachable");

        let report = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.sent_count(), 0);

        // The failure left no ledger entry, so the next run sends
        notifier.restore_sends();
        let report = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(report.sent_count(), 1);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn pending_bookings_are_not_dispatched() {
        let now = fixed_now();
        let (ctx, _) = test_context(now);
        let mut booking = due_booking();
        booking.status = BookingStatus::Pending;
        ctx.repos.bookings.insert(&booking).await.unwrap();

        let report = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert!(report.results.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn daily_run_reminds_once_per_rolling_window() {
        let now = fixed_now();
        let (ctx, notifier) = test_context(now);
        let mut booking = due_booking();
        booking.post_type = PostType::DailyRun;
        booking.date = None;
        booking.date_from = DateKey::parse("2024-06-14");
        booking.date_to = DateKey::parse("2024-06-17");
        booking.lead_time = LeadTime {
            amount: 12,
            unit: LeadTimeUnit::Hours,
        };
        ctx.repos.bookings.insert(&booking).await.unwrap();

        let report = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(report.sent_count(), 1);

        // 20 hours later the next day's occurrence is inside the advertiser
        // window again, but the 24h ledger suppresses it
        let mut later_ctx = ctx.clone();
        later_ctx.sys = Arc::new(StaticTimeSys {
            timestamp_millis: now + 20 * 60 * 60 * 1000,
        });
        let report = execute(SendDueRemindersUseCase, &later_ctx).await.unwrap();
        assert_eq!(report.sent_count(), 0);
        assert!(report
            .results
            .iter()
            .all(|r| r.outcome == DispatchOutcome::AlreadySent));
        assert_eq!(notifier.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn operator_without_enabled_channels_is_skipped() {
        let now = fixed_now();
        let (ctx, _) = test_context(now);
        let mut booking = due_booking();
        booking.advertiser_email = None;
        ctx.repos.bookings.insert(&booking).await.unwrap();
        let mut preference = operator_preference(60);
        preference.email_enabled = false;
        ctx.repos.preferences.insert(&preference).await.unwrap();

        let report = execute(SendDueRemindersUseCase, &ctx).await.unwrap();
        assert!(report.results.is_empty());
    }
}
