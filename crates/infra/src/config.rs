use chrono_tz::Tz;
use sehat_saathi_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to verify the HS256 json web tokens issued by the
    /// identity service
    pub jwt_secret: String,
    /// Time zone the reminder job reads the wall clock in. Stored `Reminder`
    /// dates and times are interpreted in this zone.
    pub reminder_timezone: Tz,
    /// Maximum number of `Notification`s returned when a client loads
    /// its notification history
    pub notifications_page_size: i64,
}

const DEFAULT_PORT: usize = 5000;

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                warn!("Did not find JWT_SECRET environment variable. Going to create one, tokens issued elsewhere will not verify.");
                create_random_secret(32)
            }
        };

        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };

        let reminder_timezone = match std::env::var("REMINDER_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given REMINDER_TIMEZONE: {} is not a valid IANA time zone, falling back to UTC.",
                        tz
                    );
                    Tz::UTC
                }
            },
            Err(_) => Tz::UTC,
        };
        info!("Reminders are evaluated in time zone: {}", reminder_timezone);

        Self {
            port,
            jwt_secret,
            reminder_timezone,
            notifications_page_size: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
