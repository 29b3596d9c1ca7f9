use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;

use super::model::{UpsertProfilePayload, UserProfile};
use crate::error::StoreError;

/// Fetch a user's profile. Profiles live at PK=USER#{user_id}, SK=PROFILE.
pub async fn get_profile(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
) -> Result<Option<UserProfile>, StoreError> {
    let result = client
        .get_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(format!("USER#{}", user_id)))
        .key("SK", AttributeValue::S("PROFILE".to_string()))
        .send()
        .await
        .map_err(|e| StoreError(format!("DynamoDB get_item error: {}", e)))?;

    let Some(item) = result.item() else {
        return Ok(None);
    };

    let email = item
        .get("user_email")
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default();
    let mut name = item
        .get("user_name")
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default();
    if name.trim().is_empty() {
        name = email.split('@').next().unwrap_or("User").to_string();
    }
    let created_at = item
        .get("user_created_at")
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default();

    Ok(Some(UserProfile {
        user_id: user_id.to_string(),
        name,
        email,
        created_at,
    }))
}

/// Create or replace a user's profile.
pub async fn put_profile(
    client: &DynamoClient,
    table_name: &str,
    user_id: &str,
    payload: UpsertProfilePayload,
) -> Result<UserProfile, StoreError> {
    let now = chrono::Utc::now().to_rfc3339();
    let pk = format!("USER#{}", user_id);

    client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(pk))
        .item("SK", AttributeValue::S("PROFILE".to_string()))
        .item("user_name", AttributeValue::S(payload.name.clone()))
        .item("user_email", AttributeValue::S(payload.email.clone()))
        .item("user_created_at", AttributeValue::S(now.clone()))
        .send()
        .await
        .map_err(|e| StoreError(format!("DynamoDB put_item error: {}", e)))?;

    Ok(UserProfile {
        user_id: user_id.to_string(),
        name: payload.name,
        email: payload.email,
        created_at: now,
    })
}
