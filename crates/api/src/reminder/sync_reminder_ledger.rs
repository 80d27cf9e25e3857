use crate::shared::usecase::UseCase;
use adslot_infra::AdslotContext;
use adslot_domain::ID;

/// Drops every ledger entry of a booking whose schedule stopped matching
/// what the entries were recorded against. Triggered as a side effect of
/// booking edits and deletions.
#[derive(Debug)]
pub enum SyncReminderLedgerTrigger {
    BookingUpdated(ID),
    BookingDeleted(ID),
}

#[derive(Debug)]
pub struct SyncReminderLedgerUseCase {
    pub trigger: SyncReminderLedgerTrigger,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncReminderLedgerUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "SyncReminderLedger";

    async fn execute(&mut self, ctx: &AdslotContext) -> Result<Self::Response, Self::Error> {
        let booking_id = match &self.trigger {
            SyncReminderLedgerTrigger::BookingUpdated(booking_id) => booking_id,
            SyncReminderLedgerTrigger::BookingDeleted(booking_id) => booking_id,
        };
        ctx.repos
            .ledger
            .delete_by_booking(booking_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok(())
    }
}
