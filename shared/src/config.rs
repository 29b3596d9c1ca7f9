use std::env;

/// Runtime configuration, read from the environment once at startup and
/// passed into components explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// DynamoDB table holding user profiles and tasks.
    pub table_name: String,
    /// Verified SES sender address for reminder emails.
    pub sender_email: String,
    /// Reminder scan period. One minute unless overridden.
    pub reminder_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "taskly".to_string()),
            sender_email: env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "reminders@taskly.app".to_string()),
            reminder_interval_secs: env::var("REMINDER_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}
