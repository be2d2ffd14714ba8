use std::sync::Arc;

use auth::AccessToken;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::INVALID_LOGIN_FORM;
use crate::inbound::http::router::AppState;

const PASSWORD_GRANT_TYPE: &str = "password";

/// Exchange a username and password for a bearer token.
///
/// The response is the bare OAuth2 token body rather than the usual
/// `ApiSuccess` envelope, since OAuth2 clients parse it directly.
pub async fn issue_token(
    State(state): State<AppState>,
    form: Result<Form<TokenRequestForm>, FormRejection>,
) -> Result<Json<AccessToken>, ApiError> {
    let Form(form) = form.map_err(|e| {
        tracing::info!(error = %e, "Malformed login form");
        ApiError::UnprocessableEntity(INVALID_LOGIN_FORM.to_string())
    })?;

    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != PASSWORD_GRANT_TYPE {
            return Err(ApiError::BadRequest(format!(
                "Unsupported grant type: {}",
                grant_type
            )));
        }
    }

    let authenticator = Arc::clone(&state.authenticator);
    let TokenRequestForm {
        username, password, ..
    } = form;

    // Password verification is CPU-bound, keep it off the async workers.
    let user = tokio::task::spawn_blocking(move || {
        authenticator.authenticate(&username, &password)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("Authentication task failed: {}", e)))?
    .map_err(|e| {
        tracing::info!(reason = %e, "Login rejected");
        ApiError::from(e)
    })?;

    let token = state.session_issuer.issue(&user)?;

    tracing::info!(username = %user.username, "Login succeeded");

    Ok(Json(token))
}

/// OAuth2 password-grant form body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestForm {
    username: String,
    password: String,
    #[serde(default)]
    grant_type: Option<String>,
}
