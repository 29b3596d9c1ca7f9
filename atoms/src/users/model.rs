use serde::{Deserialize, Serialize};

/// User profile - the contact info reminder emails are addressed to.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct UpsertProfilePayload {
    pub name: String,
    pub email: String,
}
