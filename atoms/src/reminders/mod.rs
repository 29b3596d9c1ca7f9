pub mod model;
pub mod service;

pub use model::{ReminderWindow, TickSummary};
pub use service::{qualifying_window, reminder_body, reminder_subject, EmailSender, ReminderJob};
