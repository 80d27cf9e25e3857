mod booking;
mod ledger;
mod preference;
mod settings;
mod shared;

use booking::InMemoryBookingRepo;
use ledger::InMemoryLedgerRepo;
use preference::InMemoryPreferenceRepo;
use settings::InMemorySettingsRepo;
use std::sync::Arc;

pub use booking::IBookingRepo;
pub use ledger::ILedgerRepo;
pub use preference::IPreferenceRepo;
pub use settings::ISettingsRepo;
pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub bookings: Arc<dyn IBookingRepo>,
    pub settings: Arc<dyn ISettingsRepo>,
    pub preferences: Arc<dyn IPreferenceRepo>,
    pub ledger: Arc<dyn ILedgerRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            bookings: Arc::new(InMemoryBookingRepo::new()),
            settings: Arc::new(InMemorySettingsRepo::new()),
            preferences: Arc::new(InMemoryPreferenceRepo::new()),
            ledger: Arc::new(InMemoryLedgerRepo::new()),
        }
    }
}
