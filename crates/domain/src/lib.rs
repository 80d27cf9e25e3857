mod availability;
mod booking;
mod date;
mod reminder;
mod shared;

pub use availability::{check_date, day_occupancy, AvailabilityResult, CapacityConfig, DayOccupancy};
pub use booking::{Booking, BookingStatus, CustomDate, PostType};
pub use date::{get_month_length, is_leap_year, DateKey, TimeOfDay};
pub use reminder::{
    is_due, Channel, DispatchOutcome, DispatchReport, DispatchResult, LeadTime, LeadTimeUnit,
    NotificationPreference, RecipientKind, ReminderLedgerEntry, DISPATCH_GRACE_MILLIS,
    LEDGER_SUPPRESSION_MILLIS,
};
pub use shared::entity::{Entity, ID};
