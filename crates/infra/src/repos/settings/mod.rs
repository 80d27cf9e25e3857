mod inmemory;

pub use inmemory::InMemorySettingsRepo;

use adslot_domain::CapacityConfig;

/// The capacity settings live in a singleton row owned by an external
/// settings surface. The engine only ever reads it; `set` exists for
/// seeding and admin tooling.
#[async_trait::async_trait]
pub trait ISettingsRepo: Send + Sync {
    async fn get(&self) -> anyhow::Result<CapacityConfig>;
    async fn set(&self, settings: &CapacityConfig) -> anyhow::Result<()>;
}
