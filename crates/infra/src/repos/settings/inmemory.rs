use super::ISettingsRepo;
use adslot_domain::CapacityConfig;
use std::sync::Mutex;

pub struct InMemorySettingsRepo {
    settings: Mutex<CapacityConfig>,
}

impl InMemorySettingsRepo {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(Default::default()),
        }
    }
}

#[async_trait::async_trait]
impl ISettingsRepo for InMemorySettingsRepo {
    async fn get(&self) -> anyhow::Result<CapacityConfig> {
        Ok(*self.settings.lock().unwrap())
    }

    async fn set(&self, settings: &CapacityConfig) -> anyhow::Result<()> {
        *self.settings.lock().unwrap() = *settings;
        Ok(())
    }
}
