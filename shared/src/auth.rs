use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use lambda_http::{http::StatusCode, Body, Request, Response};

/// Verified identity for one request, resolved from the bearer access token.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// Resolve the caller's identity from the Authorization header via Cognito.
/// On failure the Err side carries a ready 401 response for the router.
pub async fn authenticate(
    cognito: &CognitoClient,
    event: &Request,
) -> Result<AuthedUser, Response<Body>> {
    let token = event
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return Err(unauthorized("Missing bearer token"));
    };

    let user = match cognito.get_user().access_token(token).send().await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("token verification failed: {}", e);
            return Err(unauthorized("Invalid or expired token"));
        }
    };

    // The Cognito username is a fallback; the sub attribute is the stable id.
    let mut user_id = user.username().to_string();
    let mut email = String::new();
    let mut name = String::new();
    for attribute in user.user_attributes() {
        match attribute.name() {
            "sub" => user_id = attribute.value().unwrap_or_default().to_string(),
            "email" => email = attribute.value().unwrap_or_default().to_string(),
            "name" => name = attribute.value().unwrap_or_default().to_string(),
            _ => {}
        }
    }

    Ok(AuthedUser {
        user_id,
        email,
        name,
    })
}

fn unauthorized(message: &str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({"success": false, "error": message})
                .to_string()
                .into(),
        )
        .unwrap_or_else(|_| Response::new(Body::Empty))
}
