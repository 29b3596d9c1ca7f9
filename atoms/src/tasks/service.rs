use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use chrono::NaiveDateTime;

use super::model::{CreateTaskPayload, Task, TaskPriority, TaskStatus, UpdateTaskPayload};
use crate::error::StoreError;
use crate::users;

/// Storage format for task timestamps (naive local time, no zone).
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// An incomplete task joined with its owner's contact info, as consumed by
/// the reminder scan.
#[derive(Debug, Clone)]
pub struct PendingTask {
    pub task: Task,
    pub owner_email: String,
    pub owner_name: String,
}

/// Storage port for the notification and reminder cores. Production wires
/// `DynamoTaskStore`; tests inject in-memory fakes.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks belonging to one user, unfiltered.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Task>, StoreError>;

    /// Every task across all users that has a due date and is not Done,
    /// joined with the owner's email and name.
    async fn list_all_pending_with_owner(&self) -> Result<Vec<PendingTask>, StoreError>;
}

/// Single-table DynamoDB task storage.
/// Tasks live at PK=USER#{user_id}, SK=TASK#{task_id}.
pub struct DynamoTaskStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoTaskStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a new task for a user.
    pub async fn create_task(
        &self,
        user_id: &str,
        payload: CreateTaskPayload,
    ) -> Result<Task, StoreError> {
        let task_id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        let pk = format!("USER#{}", user_id);
        let sk = format!("TASK#{}", task_id);

        let status = payload.status.unwrap_or(TaskStatus::ToDo);
        let priority = payload.priority.unwrap_or(TaskPriority::Medium);

        let mut builder = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item("PK", AttributeValue::S(pk))
            .item("SK", AttributeValue::S(sk))
            .item("title", AttributeValue::S(payload.title.clone()))
            .item("status", AttributeValue::S(status.as_str().to_string()))
            .item("priority", AttributeValue::S(priority.as_str().to_string()))
            .item("is_recurring", AttributeValue::Bool(payload.is_recurring))
            .item("created_at", AttributeValue::S(now.clone()));

        if let Some(description) = &payload.description {
            builder = builder.item("description", AttributeValue::S(description.clone()));
        }
        if let Some(category) = &payload.category {
            builder = builder.item("category", AttributeValue::S(category.clone()));
        }
        if let Some(start_date) = payload.start_date {
            builder = builder.item(
                "start_date",
                AttributeValue::S(start_date.format(DATE_FORMAT).to_string()),
            );
        }
        if let Some(due_date) = payload.due_date {
            builder = builder.item(
                "due_date",
                AttributeValue::S(due_date.format(DATE_FORMAT).to_string()),
            );
        }
        if let Some(pattern) = &payload.recurrence_pattern {
            builder = builder.item("recurrence_pattern", AttributeValue::S(pattern.clone()));
        }

        builder
            .send()
            .await
            .map_err(|e| StoreError(format!("DynamoDB put_item error: {}", e)))?;

        Ok(Task {
            id: task_id,
            user_id: user_id.to_string(),
            title: payload.title,
            description: payload.description,
            status,
            priority,
            category: payload.category,
            start_date: payload.start_date,
            due_date: payload.due_date,
            is_recurring: payload.is_recurring,
            recurrence_pattern: payload.recurrence_pattern,
            created_at: now,
        })
    }

    /// Get a single task, scoped to its owner.
    pub async fn get_task(
        &self,
        user_id: &str,
        task_id: &str,
    ) -> Result<Option<Task>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(format!("USER#{}", user_id)))
            .key("SK", AttributeValue::S(format!("TASK#{}", task_id)))
            .send()
            .await
            .map_err(|e| StoreError(format!("DynamoDB get_item error: {}", e)))?;

        Ok(result.item().and_then(task_from_item))
    }

    /// Update only the fields present in the payload.
    pub async fn update_task(
        &self,
        user_id: &str,
        task_id: &str,
        payload: UpdateTaskPayload,
    ) -> Result<Option<Task>, StoreError> {
        if self.get_task(user_id, task_id).await?.is_none() {
            return Ok(None);
        }

        let mut update_expr = vec![];
        let mut expr_names = HashMap::new();
        let mut expr_values = HashMap::new();

        if let Some(title) = payload.title {
            update_expr.push("#title = :title");
            expr_names.insert("#title".to_string(), "title".to_string());
            expr_values.insert(":title".to_string(), AttributeValue::S(title));
        }
        if let Some(description) = payload.description {
            update_expr.push("#description = :description");
            expr_names.insert("#description".to_string(), "description".to_string());
            expr_values.insert(":description".to_string(), AttributeValue::S(description));
        }
        if let Some(status) = payload.status {
            update_expr.push("#status = :status");
            expr_names.insert("#status".to_string(), "status".to_string());
            expr_values.insert(
                ":status".to_string(),
                AttributeValue::S(status.as_str().to_string()),
            );
        }
        if let Some(priority) = payload.priority {
            update_expr.push("#priority = :priority");
            expr_names.insert("#priority".to_string(), "priority".to_string());
            expr_values.insert(
                ":priority".to_string(),
                AttributeValue::S(priority.as_str().to_string()),
            );
        }
        if let Some(category) = payload.category {
            update_expr.push("#category = :category");
            expr_names.insert("#category".to_string(), "category".to_string());
            expr_values.insert(":category".to_string(), AttributeValue::S(category));
        }
        if let Some(start_date) = payload.start_date {
            update_expr.push("#start_date = :start_date");
            expr_names.insert("#start_date".to_string(), "start_date".to_string());
            expr_values.insert(
                ":start_date".to_string(),
                AttributeValue::S(start_date.format(DATE_FORMAT).to_string()),
            );
        }
        if let Some(due_date) = payload.due_date {
            update_expr.push("#due_date = :due_date");
            expr_names.insert("#due_date".to_string(), "due_date".to_string());
            expr_values.insert(
                ":due_date".to_string(),
                AttributeValue::S(due_date.format(DATE_FORMAT).to_string()),
            );
        }
        if let Some(is_recurring) = payload.is_recurring {
            update_expr.push("#is_recurring = :is_recurring");
            expr_names.insert("#is_recurring".to_string(), "is_recurring".to_string());
            expr_values.insert(
                ":is_recurring".to_string(),
                AttributeValue::Bool(is_recurring),
            );
        }
        if let Some(pattern) = payload.recurrence_pattern {
            update_expr.push("#recurrence_pattern = :recurrence_pattern");
            expr_names.insert(
                "#recurrence_pattern".to_string(),
                "recurrence_pattern".to_string(),
            );
            expr_values.insert(
                ":recurrence_pattern".to_string(),
                AttributeValue::S(pattern),
            );
        }

        if !update_expr.is_empty() {
            let mut builder = self
                .client
                .update_item()
                .table_name(&self.table_name)
                .key("PK", AttributeValue::S(format!("USER#{}", user_id)))
                .key("SK", AttributeValue::S(format!("TASK#{}", task_id)))
                .update_expression(format!("SET {}", update_expr.join(", ")));

            for (k, v) in expr_names {
                builder = builder.expression_attribute_names(k, v);
            }
            for (k, v) in expr_values {
                builder = builder.expression_attribute_values(k, v);
            }

            builder
                .send()
                .await
                .map_err(|e| StoreError(format!("DynamoDB update_item error: {}", e)))?;
        }

        self.get_task(user_id, task_id).await
    }

    /// Delete a task.
    pub async fn delete_task(&self, user_id: &str, task_id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(format!("USER#{}", user_id)))
            .key("SK", AttributeValue::S(format!("TASK#{}", task_id)))
            .send()
            .await
            .map_err(|e| StoreError(format!("DynamoDB delete_item error: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl TaskStore for DynamoTaskStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Task>, StoreError> {
        drain_pages(|start_key| async move {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
                .expression_attribute_values(":pk", AttributeValue::S(format!("USER#{}", user_id)))
                .expression_attribute_values(":sk_prefix", AttributeValue::S("TASK#".to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| StoreError(format!("DynamoDB query error: {}", e)))?;

            let tasks = result.items().iter().filter_map(task_from_item).collect();
            Ok((tasks, result.last_evaluated_key().cloned()))
        })
        .await
    }

    async fn list_all_pending_with_owner(&self) -> Result<Vec<PendingTask>, StoreError> {
        let items = drain_pages(|start_key| async move {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression(
                    "begins_with(SK, :task_prefix) AND attribute_exists(due_date) AND #status <> :done",
                )
                .expression_attribute_names("#status", "status")
                .expression_attribute_values(
                    ":task_prefix",
                    AttributeValue::S("TASK#".to_string()),
                )
                .expression_attribute_values(
                    ":done",
                    AttributeValue::S(TaskStatus::Done.as_str().to_string()),
                )
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| StoreError(format!("DynamoDB scan error: {}", e)))?;

            Ok((result.items().to_vec(), result.last_evaluated_key().cloned()))
        })
        .await?;

        // Owner profiles are fetched once per user, not once per task.
        let mut owners: HashMap<String, Option<users::model::UserProfile>> = HashMap::new();
        let mut pending = Vec::new();

        for item in &items {
            let Some(task) = task_from_item(item) else {
                continue;
            };
            if !owners.contains_key(&task.user_id) {
                let profile =
                    users::service::get_profile(&self.client, &self.table_name, &task.user_id)
                        .await?;
                owners.insert(task.user_id.clone(), profile);
            }
            match owners.get(&task.user_id).and_then(|p| p.as_ref()) {
                Some(profile) => pending.push(PendingTask {
                    owner_email: profile.email.clone(),
                    owner_name: profile.name.clone(),
                    task,
                }),
                None => {
                    tracing::warn!(
                        user_id = %task.user_id,
                        task_id = %task.id,
                        "skipping task with no owner profile"
                    );
                }
            }
        }

        Ok(pending)
    }
}

type PageKey = HashMap<String, AttributeValue>;

/// Collects every page of a paginated DynamoDB call. A single query or scan
/// response holds at most 1MB of items; the response's `LastEvaluatedKey`
/// must be fed back as the next request's `ExclusiveStartKey` until absent,
/// or everything past the first page is dropped.
async fn drain_pages<T, F, Fut>(mut next_page: F) -> Result<Vec<T>, StoreError>
where
    F: FnMut(Option<PageKey>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<PageKey>), StoreError>>,
{
    let mut all = Vec::new();
    let mut start_key = None;

    loop {
        let (items, next_key) = next_page(start_key).await?;
        all.extend(items);
        match next_key {
            Some(key) => start_key = Some(key),
            None => break,
        }
    }

    Ok(all)
}

fn task_from_item(item: &HashMap<String, AttributeValue>) -> Option<Task> {
    let user_id = item.get("PK")?.as_s().ok()?.strip_prefix("USER#")?.to_string();
    let id = item.get("SK")?.as_s().ok()?.strip_prefix("TASK#")?.to_string();

    Some(Task {
        id,
        user_id,
        title: str_attr(item, "title"),
        description: opt_str_attr(item, "description"),
        status: item
            .get("status")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| TaskStatus::parse(s))
            .unwrap_or(TaskStatus::ToDo),
        priority: item
            .get("priority")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| TaskPriority::parse(s))
            .unwrap_or(TaskPriority::Medium),
        category: opt_str_attr(item, "category"),
        start_date: date_attr(item, "start_date"),
        due_date: date_attr(item, "due_date"),
        is_recurring: item
            .get("is_recurring")
            .and_then(|v| v.as_bool().ok())
            .copied()
            .unwrap_or(false),
        recurrence_pattern: opt_str_attr(item, "recurrence_pattern"),
        created_at: str_attr(item, "created_at"),
    })
}

fn str_attr(item: &HashMap<String, AttributeValue>, name: &str) -> String {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn opt_str_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

fn date_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Option<NaiveDateTime> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .and_then(|s| NaiveDateTime::parse_from_str(s, DATE_FORMAT).ok())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn continuation_key(sk: &str) -> PageKey {
        HashMap::from([("SK".to_string(), AttributeValue::S(sk.to_string()))])
    }

    #[tokio::test]
    async fn drain_pages_follows_continuation_keys_until_absent() {
        let pages = Mutex::new(vec![
            (vec![1, 2], Some(continuation_key("TASK#b"))),
            (vec![3], Some(continuation_key("TASK#c"))),
            (vec![4, 5], None),
        ]);
        let seen_start_keys = Mutex::new(Vec::new());

        let items = drain_pages(|start_key| {
            seen_start_keys.lock().unwrap().push(start_key);
            let page = pages.lock().unwrap().remove(0);
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);

        // Each response's last key becomes the next request's start key.
        let seen = seen_start_keys.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            [
                None,
                Some(continuation_key("TASK#b")),
                Some(continuation_key("TASK#c")),
            ]
        );
    }

    #[tokio::test]
    async fn drain_pages_stops_after_a_single_unkeyed_page() {
        let calls = Mutex::new(0u32);

        let items = drain_pages(|_| {
            *calls.lock().unwrap() += 1;
            async { Ok((vec!["only"], None)) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec!["only"]);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn drain_pages_propagates_fetch_errors() {
        let result: Result<Vec<u8>, StoreError> =
            drain_pages(|_| async { Err(StoreError("connection reset".to_string())) }).await;

        assert!(result.is_err());
    }
}
