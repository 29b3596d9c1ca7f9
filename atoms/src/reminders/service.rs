use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::model::{ReminderWindow, TickSummary};
use crate::clock::Clock;
use crate::error::EmailError;
use crate::tasks::service::{PendingTask, TaskStore};

/// Outbound email port. Production wires the SES adapter from taskly-shared.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError>;
}

// Window bounds, inclusive on both ends.
const DAY_WINDOW_HOURS: (f64, f64) = (23.0, 25.0);
const HOUR_WINDOW_MINUTES: (f64, f64) = (30.0, 90.0);

/// Which reminder window, if any, a time-to-due lands in. Overdue tasks never
/// match; the notification endpoint surfaces those instead.
pub fn qualifying_window(diff_minutes: f64) -> Option<ReminderWindow> {
    let diff_hours = diff_minutes / 60.0;
    if (DAY_WINDOW_HOURS.0..=DAY_WINDOW_HOURS.1).contains(&diff_hours) {
        Some(ReminderWindow::OneDay)
    } else if (HOUR_WINDOW_MINUTES.0..=HOUR_WINDOW_MINUTES.1).contains(&diff_minutes) {
        Some(ReminderWindow::OneHour)
    } else {
        None
    }
}

pub fn reminder_subject(title: &str, window: ReminderWindow) -> String {
    format!("Task Reminder: {} (Due in {})", title, window.label())
}

/// Plain-text reminder body: task title, due date, priority, status, the
/// description when one exists, and the qualifying window.
pub fn reminder_body(
    entry: &PendingTask,
    due_date: NaiveDateTime,
    window: ReminderWindow,
) -> String {
    let task = &entry.task;
    let name = if entry.owner_name.trim().is_empty() {
        "there"
    } else {
        entry.owner_name.as_str()
    };

    let mut body = format!(
        "Hi {}!\n\nThis is a reminder for your task:\n\nTask: {}\nDue Date: {}\nPriority: {}\nStatus: {}\n",
        name,
        task.title,
        due_date.format("%Y-%m-%d %H:%M"),
        task.priority.as_str(),
        task.status.as_str(),
    );
    if let Some(description) = &task.description {
        body.push_str(&format!("Description: {}\n", description));
    }
    body.push_str(&format!(
        "\nThis task is due in {}!\n\nDon't forget to complete it on time.\n\n---\nTaskly",
        window.label()
    ));
    body
}

/// Background reminder scan over every user's incomplete tasks. The worker
/// binary owns the timer and calls `tick` once per period, so a tick is fully
/// deterministic given the injected store, mailer and clock.
pub struct ReminderJob<S, M, C> {
    store: S,
    mailer: M,
    clock: C,
}

impl<S: TaskStore, M: EmailSender, C: Clock> ReminderJob<S, M, C> {
    pub fn new(store: S, mailer: M, clock: C) -> Self {
        Self {
            store,
            mailer,
            clock,
        }
    }

    /// Scan every pending task once and send qualifying reminders. A send
    /// failure is isolated to its task; a fetch failure skips the whole tick.
    pub async fn tick(&self) -> TickSummary {
        let pending = match self.store.list_all_pending_with_owner().await {
            Ok(pending) => pending,
            Err(e) => {
                tracing::error!("reminder scan skipped, task fetch failed: {}", e);
                return TickSummary::default();
            }
        };

        let now = self.clock.now();
        let mut summary = TickSummary {
            scanned: pending.len(),
            ..TickSummary::default()
        };
        tracing::info!(tasks = pending.len(), "running reminder scan");

        for entry in &pending {
            let Some(due_date) = entry.task.due_date else {
                continue;
            };
            let diff_minutes = (due_date - now).num_seconds() as f64 / 60.0;

            match qualifying_window(diff_minutes) {
                Some(window) => {
                    let subject = reminder_subject(&entry.task.title, window);
                    let body = reminder_body(entry, due_date, window);
                    match self.mailer.send(&entry.owner_email, &subject, &body).await {
                        Ok(()) => {
                            tracing::info!(
                                task_id = %entry.task.id,
                                to = %entry.owner_email,
                                window = window.label(),
                                "reminder sent"
                            );
                            summary.sent += 1;
                        }
                        Err(e) => {
                            tracing::error!(
                                task_id = %entry.task.id,
                                "failed to send reminder: {}",
                                e
                            );
                            summary.failed += 1;
                        }
                    }
                }
                None if diff_minutes > 0.0 && diff_minutes < HOUR_WINDOW_MINUTES.0 => {
                    tracing::info!(
                        task_id = %entry.task.id,
                        minutes = diff_minutes.round(),
                        "task due soon but below reminder window"
                    );
                }
                None => {}
            }
        }

        summary
    }
}
