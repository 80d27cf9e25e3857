use super::IBookingRepo;
use crate::repos::shared::inmemory_repo::*;
use adslot_domain::{Booking, ID};

pub struct InMemoryBookingRepo {
    bookings: std::sync::Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepo {
    pub fn new() -> Self {
        Self {
            bookings: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IBookingRepo for InMemoryBookingRepo {
    async fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        insert(booking, &self.bookings);
        Ok(())
    }

    async fn save(&self, booking: &Booking) -> anyhow::Result<()> {
        save(booking, &self.bookings);
        Ok(())
    }

    async fn find(&self, booking_id: &ID) -> Option<Booking> {
        find(booking_id, &self.bookings)
    }

    async fn delete(&self, booking_id: &ID) -> Option<Booking> {
        delete(booking_id, &self.bookings)
    }

    async fn find_countable(&self) -> anyhow::Result<Vec<Booking>> {
        Ok(find_by(&self.bookings, |booking| {
            booking.status.is_countable()
        }))
    }

    async fn find_scheduled(&self) -> anyhow::Result<Vec<Booking>> {
        Ok(find_by(&self.bookings, |booking| {
            booking.status.is_scheduled()
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use adslot_domain::{BookingStatus, PostType};

    fn booking_with_status(status: BookingStatus) -> Booking {
        Booking {
            id: Default::default(),
            ad_name: "Spot".into(),
            advertiser_name: "Acme".into(),
            advertiser_email: None,
            post_type: PostType::OneTime,
            date: None,
            time: None,
            date_from: None,
            date_to: None,
            custom_dates: Vec::new(),
            status,
            lead_time: Default::default(),
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn countable_snapshot_excludes_inactive_statuses() {
        let repo = InMemoryBookingRepo::new();
        for status in [
            BookingStatus::Pending,
            BookingStatus::Scheduled,
            BookingStatus::Archived,
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
        ]
        .iter()
        {
            repo.insert(&booking_with_status(*status)).await.unwrap();
        }

        assert_eq!(repo.find_countable().await.unwrap().len(), 2);
        assert_eq!(repo.find_scheduled().await.unwrap().len(), 1);
    }
}
