use lambda_http::{http::StatusCode, Body, Error, Response};

use super::model::{CreateTaskPayload, UpdateTaskPayload};
use super::service::{DynamoTaskStore, TaskStore};

fn json_response(status: StatusCode, body: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(body.into())
        .map_err(Box::new)?)
}

fn body_bytes(body: &Body) -> &[u8] {
    match body {
        Body::Text(text) => text.as_bytes(),
        Body::Binary(bytes) => bytes,
        Body::Empty => &[],
    }
}

/// List every task belonging to the authenticated user.
pub async fn list_tasks(
    store: &DynamoTaskStore,
    user_id: &str,
) -> Result<Response<Body>, Error> {
    match store.list_for_user(user_id).await {
        Ok(tasks) => json_response(StatusCode::OK, serde_json::to_string(&tasks)?),
        Err(e) => {
            tracing::error!("failed to list tasks: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "Failed to fetch tasks"}).to_string(),
            )
        }
    }
}

/// Get a single task.
pub async fn get_task(
    store: &DynamoTaskStore,
    user_id: &str,
    task_id: &str,
) -> Result<Response<Body>, Error> {
    match store.get_task(user_id, task_id).await {
        Ok(Some(task)) => json_response(StatusCode::OK, serde_json::to_string(&task)?),
        Ok(None) => json_response(
            StatusCode::NOT_FOUND,
            serde_json::json!({"message": "Task not found"}).to_string(),
        ),
        Err(e) => {
            tracing::error!("failed to get task: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "Failed to fetch task"}).to_string(),
            )
        }
    }
}

/// Create a task for the authenticated user.
pub async fn create_task(
    store: &DynamoTaskStore,
    user_id: &str,
    body: &Body,
) -> Result<Response<Body>, Error> {
    let payload: CreateTaskPayload = match serde_json::from_slice(body_bytes(body)) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("failed to parse create task payload: {}", e);
            return json_response(
                StatusCode::BAD_REQUEST,
                serde_json::json!({"error": format!("Invalid request body: {}", e)}).to_string(),
            );
        }
    };

    match store.create_task(user_id, payload).await {
        Ok(task) => json_response(
            StatusCode::CREATED,
            serde_json::json!({"message": "Task created successfully", "taskId": task.id})
                .to_string(),
        ),
        Err(e) => {
            tracing::error!("failed to create task: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "Failed to create task"}).to_string(),
            )
        }
    }
}

/// Partially update a task; only fields present in the payload change.
pub async fn update_task(
    store: &DynamoTaskStore,
    user_id: &str,
    task_id: &str,
    body: &Body,
) -> Result<Response<Body>, Error> {
    let payload: UpdateTaskPayload = match serde_json::from_slice(body_bytes(body)) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("failed to parse update task payload: {}", e);
            return json_response(
                StatusCode::BAD_REQUEST,
                serde_json::json!({"error": format!("Invalid request body: {}", e)}).to_string(),
            );
        }
    };

    match store.update_task(user_id, task_id, payload).await {
        Ok(Some(_)) => json_response(
            StatusCode::OK,
            serde_json::json!({"message": "Task updated successfully"}).to_string(),
        ),
        Ok(None) => json_response(
            StatusCode::NOT_FOUND,
            serde_json::json!({"message": "Task not found"}).to_string(),
        ),
        Err(e) => {
            tracing::error!("failed to update task: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "Failed to update task"}).to_string(),
            )
        }
    }
}

/// Delete a task.
pub async fn delete_task(
    store: &DynamoTaskStore,
    user_id: &str,
    task_id: &str,
) -> Result<Response<Body>, Error> {
    match store.delete_task(user_id, task_id).await {
        Ok(()) => json_response(
            StatusCode::OK,
            serde_json::json!({"message": "Task deleted"}).to_string(),
        ),
        Err(e) => {
            tracing::error!("failed to delete task: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"error": "Failed to delete task"}).to_string(),
            )
        }
    }
}
