use chrono::NaiveDateTime;
use serde::Serialize;

use crate::tasks::model::{TaskPriority, TaskStatus};

/// Urgency class of a due-date notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Overdue,
    Urgent,
    Info,
}

/// Ephemeral view over a task at evaluation time. Never persisted or cached;
/// recomputed fresh on every request.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub minutes_until_due: i64,
    pub message: String,
}
