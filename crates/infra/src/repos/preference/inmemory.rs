use super::IPreferenceRepo;
use crate::repos::shared::inmemory_repo::*;
use adslot_domain::{NotificationPreference, RecipientKind};

pub struct InMemoryPreferenceRepo {
    preferences: std::sync::Mutex<Vec<NotificationPreference>>,
}

impl InMemoryPreferenceRepo {
    pub fn new() -> Self {
        Self {
            preferences: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IPreferenceRepo for InMemoryPreferenceRepo {
    async fn insert(&self, preference: &NotificationPreference) -> anyhow::Result<()> {
        insert(preference, &self.preferences);
        Ok(())
    }

    async fn find_by_recipient(
        &self,
        recipient: RecipientKind,
    ) -> anyhow::Result<Vec<NotificationPreference>> {
        Ok(find_by(&self.preferences, |preference| {
            preference.recipient == recipient
        }))
    }
}
