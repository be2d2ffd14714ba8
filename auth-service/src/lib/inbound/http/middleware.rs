use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::NOT_AUTHENTICATED;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Middleware that resolves the bearer token to an active user and adds it
/// to request extensions as [`auth::AuthenticatedUser`].
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let user = state.session_resolver.resolve_active(token)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized(NOT_AUTHENTICATED.to_string()))?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid ASCII");
        ApiError::Unauthorized(NOT_AUTHENTICATED.to_string())
    })?;

    match auth_str.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => {
            tracing::warn!("Authorization header is not a bearer credential");
            Err(ApiError::Unauthorized(NOT_AUTHENTICATED.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(header: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/users/me");
        if let Some(value) = header {
            builder = builder.header(http::header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = request_with(Some("Bearer abc.def.ghi"));
        assert_eq!(extract_token_from_header(&req), Ok("abc.def.ghi"));

        let req = request_with(Some("bearer abc.def.ghi"));
        assert_eq!(extract_token_from_header(&req), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        let req = request_with(None);
        assert_eq!(
            extract_token_from_header(&req),
            Err(ApiError::Unauthorized(NOT_AUTHENTICATED.to_string()))
        );
    }

    #[test]
    fn test_other_scheme_or_empty_token() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer   ", "abc.def.ghi"] {
            let req = request_with(Some(value));
            assert!(extract_token_from_header(&req).is_err(), "{} accepted", value);
        }
    }
}
