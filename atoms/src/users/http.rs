use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};

use super::model::UpsertProfilePayload;
use super::service;

/// Return the authenticated user's profile.
pub async fn get_me(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
) -> Result<Response<Body>, Error> {
    match service::get_profile(client, table_name, user_id).await {
        Ok(Some(profile)) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(serde_json::to_string(&profile)?.into())
            .map_err(Box::new)?),
        Ok(None) => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(serde_json::json!({"error": "User not found"}).to_string().into())
            .map_err(Box::new)?),
        Err(e) => {
            tracing::error!("failed to fetch user profile: {}", e);
            Ok(Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(
                    serde_json::json!({"error": "Failed to fetch user"})
                        .to_string()
                        .into(),
                )
                .map_err(Box::new)?)
        }
    }
}

/// Create or replace the authenticated user's profile.
pub async fn upsert_me(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let payload: UpsertProfilePayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            return Ok(Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(
                    serde_json::json!({"error": format!("Invalid request body: {}", e)})
                        .to_string()
                        .into(),
                )
                .map_err(Box::new)?)
        }
    };

    match service::put_profile(client, table_name, user_id, payload).await {
        Ok(profile) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(serde_json::to_string(&profile)?.into())
            .map_err(Box::new)?),
        Err(e) => {
            tracing::error!("failed to store user profile: {}", e);
            Ok(Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .header("Access-Control-Allow-Origin", "*")
                .body(
                    serde_json::json!({"error": "Failed to store user"})
                        .to_string()
                        .into(),
                )
                .map_err(Box::new)?)
        }
    }
}
