mod inmemory;

pub use inmemory::InMemoryPreferenceRepo;

use adslot_domain::{NotificationPreference, RecipientKind};

#[async_trait::async_trait]
pub trait IPreferenceRepo: Send + Sync {
    async fn insert(&self, preference: &NotificationPreference) -> anyhow::Result<()>;
    async fn find_by_recipient(
        &self,
        recipient: RecipientKind,
    ) -> anyhow::Result<Vec<NotificationPreference>>;
}
