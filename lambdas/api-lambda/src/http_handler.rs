use std::sync::Arc;

use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, Response,
};
use taskly_atoms as atoms;
use taskly_shared::{auth, response, AppState};

use atoms::clock::{Clock, SystemClock};
use atoms::tasks::DynamoTaskStore;

fn body_bytes(body: &Body) -> &[u8] {
    match body {
        Body::Text(text) => text.as_bytes(),
        Body::Binary(bytes) => bytes,
        Body::Empty => &[],
    }
}

/// Main Lambda handler - authenticates the caller and routes to the atom
/// handlers. Every response leaves with CORS headers attached.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    tracing::info!("API invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if method == Method::OPTIONS {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(response::with_cors_headers(resp));
    }

    // Everything below requires a verified identity.
    let user = match auth::authenticate(&state.cognito_client, &event).await {
        Ok(user) => user,
        Err(resp) => return Ok(response::with_cors_headers(resp)),
    };

    let store = DynamoTaskStore::new(
        state.dynamo_client.clone(),
        state.config.table_name.clone(),
    );
    let body = event.body();

    let resp = if path == "/notifications" {
        match method {
            &Method::GET => {
                atoms::notifications::http::get_notifications(
                    &store,
                    &user.user_id,
                    SystemClock.now(),
                )
                .await
            }
            _ => response::error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        }
    } else if path == "/tasks" {
        match method {
            &Method::GET => atoms::tasks::http::list_tasks(&store, &user.user_id).await,
            &Method::POST => atoms::tasks::http::create_task(&store, &user.user_id, body).await,
            _ => response::error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        }
    } else if let Some(task_id) = path.strip_prefix("/tasks/") {
        match method {
            &Method::GET => atoms::tasks::http::get_task(&store, &user.user_id, task_id).await,
            &Method::PUT => {
                atoms::tasks::http::update_task(&store, &user.user_id, task_id, body).await
            }
            &Method::DELETE => {
                atoms::tasks::http::delete_task(&store, &user.user_id, task_id).await
            }
            _ => response::error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        }
    } else if path == "/users/me" {
        match method {
            &Method::GET => {
                atoms::users::http::get_me(
                    &state.dynamo_client,
                    &state.config.table_name,
                    &user.user_id,
                )
                .await
            }
            &Method::PUT => {
                atoms::users::http::upsert_me(
                    &state.dynamo_client,
                    &state.config.table_name,
                    &user.user_id,
                    body_bytes(body),
                )
                .await
            }
            _ => response::error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        }
    } else {
        response::error_response(StatusCode::NOT_FOUND, "Not found")
    };

    resp.map(response::with_cors_headers)
}
