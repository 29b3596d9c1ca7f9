use chrono::NaiveDateTime;

use super::model::{Notification, NotificationType};
use crate::tasks::model::{Task, TaskStatus};

/// Tasks due at or before now + this many minutes qualify for a notification.
pub const DUE_SOON_HORIZON_MINUTES: i64 = 60;

/// Whole minutes between now and the due date; negative once the task is
/// overdue. Truncates toward zero, matching whole elapsed minutes.
pub fn minutes_until_due(due_date: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (due_date - now).num_minutes()
}

/// Classify a time-to-due. The `Info` branch is unreachable through the
/// notification endpoint (the selection predicate stops at 60 minutes) but is
/// kept so the message formatter covers the whole range.
pub fn classify(minutes_until_due: i64) -> NotificationType {
    if minutes_until_due <= 0 {
        NotificationType::Overdue
    } else if minutes_until_due <= DUE_SOON_HORIZON_MINUTES {
        NotificationType::Urgent
    } else {
        NotificationType::Info
    }
}

/// Render the human-readable notification line for a task title and its
/// time-to-due. Formats are load-bearing; the frontend matches on them.
pub fn notification_message(title: &str, minutes_until_due: i64) -> String {
    if minutes_until_due <= 0 {
        let overdue_minutes = minutes_until_due.abs();
        if overdue_minutes < 60 {
            format!(
                "OVERDUE: \"{}\" was due {} minutes ago!",
                title, overdue_minutes
            )
        } else {
            format!(
                "OVERDUE: \"{}\" was due {}h {}m ago!",
                title,
                overdue_minutes / 60,
                overdue_minutes % 60
            )
        }
    } else if minutes_until_due <= DUE_SOON_HORIZON_MINUTES {
        format!(
            "URGENT: \"{}\" is due in {} minutes!",
            title, minutes_until_due
        )
    } else {
        format!("\"{}\" is due soon", title)
    }
}

/// Build the ordered notification set for one user's tasks: incomplete tasks
/// with a due date at or before now + 60 minutes, earliest due first.
pub fn build_notifications(tasks: Vec<Task>, now: NaiveDateTime) -> Vec<Notification> {
    let mut due_soon: Vec<(NaiveDateTime, Task)> = tasks
        .into_iter()
        .filter(|task| task.status != TaskStatus::Done)
        .filter_map(|task| task.due_date.map(|due| (due, task)))
        .filter(|(due, _)| minutes_until_due(*due, now) <= DUE_SOON_HORIZON_MINUTES)
        .collect();

    due_soon.sort_by_key(|(due, _)| *due);

    due_soon
        .into_iter()
        .map(|(due_date, task)| {
            let minutes = minutes_until_due(due_date, now);
            let message = notification_message(&task.title, minutes);
            Notification {
                id: task.id,
                title: task.title,
                description: task.description,
                due_date,
                priority: task.priority,
                status: task.status,
                category: task.category,
                kind: classify(minutes),
                minutes_until_due: minutes,
                message,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::model::TaskPriority;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn task(id: &str, title: &str, status: TaskStatus, due: Option<NaiveDateTime>) -> Task {
        Task {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: title.to_string(),
            description: None,
            status,
            priority: TaskPriority::Medium,
            category: None,
            start_date: None,
            due_date: due,
            is_recurring: false,
            recurrence_pattern: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify(-5), NotificationType::Overdue);
        assert_eq!(classify(0), NotificationType::Overdue);
        assert_eq!(classify(1), NotificationType::Urgent);
        assert_eq!(classify(60), NotificationType::Urgent);
        assert_eq!(classify(61), NotificationType::Info);
    }

    #[test]
    fn overdue_message_under_an_hour() {
        assert_eq!(
            notification_message("Submit report", -45),
            "OVERDUE: \"Submit report\" was due 45 minutes ago!"
        );
    }

    #[test]
    fn overdue_message_over_an_hour() {
        assert_eq!(
            notification_message("Submit report", -90),
            "OVERDUE: \"Submit report\" was due 1h 30m ago!"
        );
    }

    #[test]
    fn urgent_message() {
        assert_eq!(
            notification_message("Submit report", 15),
            "URGENT: \"Submit report\" is due in 15 minutes!"
        );
    }

    #[test]
    fn info_fallback_message() {
        assert_eq!(
            notification_message("Submit report", 90),
            "\"Submit report\" is due soon"
        );
    }

    #[test]
    fn done_tasks_never_notify() {
        let now = dt(12, 0);
        // Overdue by an hour, but Done.
        let tasks = vec![task("t1", "Done task", TaskStatus::Done, Some(dt(11, 0)))];
        assert!(build_notifications(tasks, now).is_empty());
    }

    #[test]
    fn tasks_without_due_date_never_notify() {
        let now = dt(12, 0);
        let tasks = vec![task("t1", "No due date", TaskStatus::ToDo, None)];
        assert!(build_notifications(tasks, now).is_empty());
    }

    #[test]
    fn tasks_beyond_horizon_are_excluded() {
        let now = dt(12, 0);
        // Due in 90 minutes: the info formatter exists, but selection stops at 60.
        let tasks = vec![task("t1", "Later", TaskStatus::ToDo, Some(dt(13, 30)))];
        assert!(build_notifications(tasks, now).is_empty());
    }

    #[test]
    fn overdue_and_urgent_tasks_are_classified() {
        let now = dt(12, 0);
        let tasks = vec![
            task("t1", "Late", TaskStatus::ToDo, Some(dt(11, 30))),
            task("t2", "Soon", TaskStatus::InProgress, Some(dt(12, 30))),
        ];
        let notifications = build_notifications(tasks, now);
        assert_eq!(notifications.len(), 2);

        assert_eq!(notifications[0].kind, NotificationType::Overdue);
        assert_eq!(notifications[0].minutes_until_due, -30);
        assert_eq!(
            notifications[0].message,
            "OVERDUE: \"Late\" was due 30 minutes ago!"
        );

        assert_eq!(notifications[1].kind, NotificationType::Urgent);
        assert_eq!(notifications[1].minutes_until_due, 30);
        assert_eq!(
            notifications[1].message,
            "URGENT: \"Soon\" is due in 30 minutes!"
        );
    }

    #[test]
    fn notifications_sorted_by_due_date_ascending() {
        let now = dt(12, 0);
        let tasks = vec![
            task("t2", "Second", TaskStatus::ToDo, Some(dt(12, 10))),
            task("t3", "Third", TaskStatus::ToDo, Some(dt(12, 45))),
            task("t1", "First", TaskStatus::ToDo, Some(dt(10, 0))),
        ];
        let notifications = build_notifications(tasks, now);
        let ids: Vec<&str> = notifications.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
    }
}
