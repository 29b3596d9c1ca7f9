pub mod clock;
pub mod error;
pub mod notifications;
pub mod reminders;
pub mod tasks;
pub mod users;
