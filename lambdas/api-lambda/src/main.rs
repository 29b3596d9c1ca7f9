mod http_handler;

use std::sync::Arc;

use http_handler::function_handler;
use lambda_http::{run, service_fn, tracing, Error};
use taskly_shared::{config::AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let aws_config = aws_config::load_from_env().await;
    let state = Arc::new(AppState {
        dynamo_client: aws_sdk_dynamodb::Client::new(&aws_config),
        cognito_client: aws_sdk_cognitoidentityprovider::Client::new(&aws_config),
        config: AppConfig::from_env(),
    });

    run(service_fn(move |event| {
        let state = state.clone();
        async move { function_handler(event, state).await }
    }))
    .await
}
