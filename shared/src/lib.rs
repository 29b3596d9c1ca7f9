pub mod auth;
pub mod config;
pub mod email;
pub mod response;

use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_dynamodb::Client as DynamoClient;

use config::AppConfig;

/// Shared state for the API lambda, built once at startup.
pub struct AppState {
    pub dynamo_client: DynamoClient,
    pub cognito_client: CognitoClient,
    pub config: AppConfig,
}
