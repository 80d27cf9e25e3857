mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
use repos::Repos;
pub use repos::{DeleteResult, IBookingRepo, ILedgerRepo, IPreferenceRepo, ISettingsRepo};
pub use services::{GatewayNotifier, INotifier, InMemoryNotifier, Notification};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct AdslotContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: Arc<dyn INotifier>,
}

impl AdslotContext {
    fn create(config: Config) -> Self {
        let notifier: Arc<dyn INotifier> = match &config.notify_gateway_url {
            Some(url) => Arc::new(GatewayNotifier::new(
                url.clone(),
                config.notify_gateway_key.clone(),
            )),
            None => {
                info!("No notification gateway configured, using the inmemory notifier.");
                Arc::new(InMemoryNotifier::new())
            }
        };
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> AdslotContext {
    AdslotContext::create(Config::new())
}
