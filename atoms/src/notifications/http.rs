use chrono::NaiveDateTime;
use lambda_http::{http::StatusCode, Body, Error, Response};

use super::service::build_notifications;
use crate::tasks::service::TaskStore;

/// GET /notifications - due-soon and overdue notifications for one user,
/// computed fresh against `now`. Always answers with a success/failure
/// envelope; a storage failure never escapes as a thrown error.
pub async fn get_notifications<S: TaskStore>(
    store: &S,
    user_id: &str,
    now: NaiveDateTime,
) -> Result<Response<Body>, Error> {
    match store.list_for_user(user_id).await {
        Ok(tasks) => {
            let notifications = build_notifications(tasks, now);
            tracing::info!(
                user_id,
                count = notifications.len(),
                "computed due-soon notifications"
            );
            Ok(Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(
                    serde_json::json!({"success": true, "data": notifications})
                        .to_string()
                        .into(),
                )
                .map_err(Box::new)?)
        }
        Err(e) => {
            tracing::error!("failed to fetch tasks for notifications: {}", e);
            Ok(Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(
                    serde_json::json!({"success": false, "error": "Failed to fetch notifications"})
                        .to_string()
                        .into(),
                )
                .map_err(Box::new)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::tasks::model::{Task, TaskPriority, TaskStatus};
    use crate::tasks::service::PendingTask;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FakeStore {
        tasks: Vec<Task>,
        fail: bool,
    }

    #[async_trait]
    impl TaskStore for FakeStore {
        async fn list_for_user(&self, _user_id: &str) -> Result<Vec<Task>, StoreError> {
            if self.fail {
                return Err(StoreError("connection refused".to_string()));
            }
            Ok(self.tasks.clone())
        }

        async fn list_all_pending_with_owner(&self) -> Result<Vec<PendingTask>, StoreError> {
            Ok(vec![])
        }
    }

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn body_json(response: Response<Body>) -> serde_json::Value {
        match response.into_body() {
            Body::Text(text) => serde_json::from_str(&text).unwrap(),
            _ => panic!("expected text body"),
        }
    }

    #[tokio::test]
    async fn returns_success_envelope_with_notifications() {
        let store = FakeStore {
            tasks: vec![Task {
                id: "t1".to_string(),
                user_id: "u1".to_string(),
                title: "Soon".to_string(),
                description: None,
                status: TaskStatus::ToDo,
                priority: TaskPriority::High,
                category: Some("Work".to_string()),
                start_date: None,
                due_date: Some(dt(12, 30)),
                is_recurring: false,
                recurrence_pattern: None,
                created_at: String::new(),
            }],
            fail: false,
        };

        let response = get_notifications(&store, "u1", dt(12, 0)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["type"], "urgent");
        assert_eq!(json["data"][0]["minutes_until_due"], 30);
        assert_eq!(json["data"][0]["message"], "URGENT: \"Soon\" is due in 30 minutes!");
    }

    #[tokio::test]
    async fn empty_result_is_success_not_failure() {
        let store = FakeStore {
            tasks: vec![],
            fail: false,
        };

        let response = get_notifications(&store, "u1", dt(12, 0)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn storage_failure_yields_failure_envelope() {
        let store = FakeStore {
            tasks: vec![],
            fail: true,
        };

        let response = get_notifications(&store, "u1", dt(12, 0)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to fetch notifications");
    }
}
