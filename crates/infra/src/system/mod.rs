use chrono::Utc;

/// Clock abstraction. Reminder window math depends on "now", so tests swap
/// in a fixed clock to pin runs to known instants.
pub trait ISys: Send + Sync {
    /// Current instant as epoch millis
    fn get_timestamp_millis(&self) -> i64;
}

/// The real wall clock, used outside of tests
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
