use super::ILedgerRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::repo::DeleteResult;
use adslot_domain::{Channel, RecipientKind, ReminderLedgerEntry, ID};

pub struct InMemoryLedgerRepo {
    entries: std::sync::Mutex<Vec<ReminderLedgerEntry>>,
}

impl InMemoryLedgerRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ILedgerRepo for InMemoryLedgerRepo {
    async fn insert(&self, entry: &ReminderLedgerEntry) -> anyhow::Result<()> {
        insert(entry, &self.entries);
        Ok(())
    }

    async fn find_sent_after(
        &self,
        booking_id: &ID,
        recipient: RecipientKind,
        channel: Channel,
        after: i64,
    ) -> Option<ReminderLedgerEntry> {
        let entries = find_by(&self.entries, |entry: &ReminderLedgerEntry| {
            entry.booking_id == *booking_id
                && entry.recipient == recipient
                && entry.channel == channel
                && entry.sent_at > after
        });
        entries.into_iter().next()
    }

    async fn delete_by_booking(&self, booking_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.entries, |entry: &ReminderLedgerEntry| {
            entry.booking_id == *booking_id
        });
        Ok(res)
    }
}
