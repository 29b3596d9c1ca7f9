pub mod http;
pub mod model;
pub mod service;

pub use model::{Notification, NotificationType};
pub use service::{build_notifications, classify, minutes_until_due, notification_message};
