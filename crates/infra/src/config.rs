use chrono_tz::Tz;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// The fixed wall-clock zone every "today"/"now" comparison happens in.
    /// Stored dates and the dispatcher must agree on this regardless of the
    /// zone the server process itself runs in.
    pub timezone: Tz,
    /// Where reminder notifications are POSTed for delivery. When unset the
    /// notifications are kept in memory, which is what tests and local
    /// development want.
    pub notify_gateway_url: Option<String>,
    /// Shared secret sent along with every gateway request
    pub notify_gateway_key: String,
}

const DEFAULT_TIMEZONE: &str = "America/New_York";

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let timezone = std::env::var("APP_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.into());
        let timezone = match timezone.parse::<Tz>() {
            Ok(timezone) => timezone,
            Err(_) => {
                warn!(
                    "The given APP_TIMEZONE: {} is not a valid IANA timezone, falling back to: {}.",
                    timezone, DEFAULT_TIMEZONE
                );
                DEFAULT_TIMEZONE.parse::<Tz>().unwrap()
            }
        };

        let notify_gateway_url = std::env::var("NOTIFY_GATEWAY_URL").ok();
        if notify_gateway_url.is_none() {
            info!(
                "Did not find NOTIFY_GATEWAY_URL environment variable. Reminder notifications will be recorded in memory only."
            );
        }
        let notify_gateway_key = std::env::var("NOTIFY_GATEWAY_KEY").unwrap_or_default();

        Self {
            port,
            timezone,
            notify_gateway_url,
            notify_gateway_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
