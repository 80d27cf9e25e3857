use super::delete_booking::DeleteBookingUseCase;
use super::update_booking::{UpdateBookingUseCase, UpdatedBooking};
use crate::reminder::sync_reminder_ledger::{
    SyncReminderLedgerTrigger, SyncReminderLedgerUseCase,
};
use crate::shared::usecase::{execute, Subscriber};
use adslot_domain::Booking;
use adslot_infra::AdslotContext;

pub struct InvalidateLedgerOnScheduleChange;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateBookingUseCase> for InvalidateLedgerOnScheduleChange {
    async fn notify(&self, e: &UpdatedBooking, ctx: &AdslotContext) {
        if !e.schedule_changed {
            return;
        }
        let sync_reminder_ledger = SyncReminderLedgerUseCase {
            trigger: SyncReminderLedgerTrigger::BookingUpdated(e.booking.id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(sync_reminder_ledger, ctx).await;
    }
}

pub struct InvalidateLedgerOnBookingDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteBookingUseCase> for InvalidateLedgerOnBookingDeleted {
    async fn notify(&self, e: &Booking, ctx: &AdslotContext) {
        let sync_reminder_ledger = SyncReminderLedgerUseCase {
            trigger: SyncReminderLedgerTrigger::BookingDeleted(e.id.clone()),
        };

        // Sideeffect, ignore result
        let _ = execute(sync_reminder_ledger, ctx).await;
    }
}
