mod inmemory;

pub use inmemory::InMemoryBookingRepo;

use adslot_domain::{Booking, ID};

#[async_trait::async_trait]
pub trait IBookingRepo: Send + Sync {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn save(&self, booking: &Booking) -> anyhow::Result<()>;
    async fn find(&self, booking_id: &ID) -> Option<Booking>;
    async fn delete(&self, booking_id: &ID) -> Option<Booking>;
    /// Snapshot of the bookings that count toward daily capacity
    async fn find_countable(&self) -> anyhow::Result<Vec<Booking>>;
    /// Snapshot of the bookings eligible for reminder dispatch
    async fn find_scheduled(&self) -> anyhow::Result<Vec<Booking>>;
}
