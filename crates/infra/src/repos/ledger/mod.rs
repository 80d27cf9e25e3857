mod inmemory;

pub use inmemory::InMemoryLedgerRepo;

use crate::repos::shared::repo::DeleteResult;
use adslot_domain::{Channel, RecipientKind, ReminderLedgerEntry, ID};

/// The reminder dedup ledger. Append-only from the engine's side: entries
/// are inserted and read, and only removed wholesale for a booking whose
/// schedule changed (the recorded "already notified" state no longer
/// corresponds to a real occurrence then).
#[async_trait::async_trait]
pub trait ILedgerRepo: Send + Sync {
    async fn insert(&self, entry: &ReminderLedgerEntry) -> anyhow::Result<()>;
    async fn find_sent_after(
        &self,
        booking_id: &ID,
        recipient: RecipientKind,
        channel: Channel,
        after: i64,
    ) -> Option<ReminderLedgerEntry>;
    async fn delete_by_booking(&self, booking_id: &ID) -> anyhow::Result<DeleteResult>;
}
