use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::JwtHandler;
use auth::SessionIssuer;
use auth::SessionResolver;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::issue_token::issue_token;
use super::handlers::read_own_items::read_own_items;
use super::handlers::read_users_me::read_users_me;
use super::middleware::authenticate as auth_middleware;
use crate::outbound::directory::InMemoryUserDirectory;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator<InMemoryUserDirectory>>,
    pub session_issuer: Arc<SessionIssuer>,
    pub session_resolver: Arc<SessionResolver<InMemoryUserDirectory>>,
}

impl AppState {
    pub fn new(
        directory: Arc<InMemoryUserDirectory>,
        jwt_handler: Arc<JwtHandler>,
        access_token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            authenticator: Arc::new(Authenticator::new(Arc::clone(&directory))),
            session_issuer: Arc::new(SessionIssuer::with_ttl(
                Arc::clone(&jwt_handler),
                access_token_ttl,
            )),
            session_resolver: Arc::new(SessionResolver::new(jwt_handler, directory)),
        }
    }
}

pub fn create_router(
    directory: Arc<InMemoryUserDirectory>,
    jwt_handler: Arc<JwtHandler>,
    access_token_ttl: chrono::Duration,
) -> Router {
    let state = AppState::new(directory, jwt_handler, access_token_ttl);

    let public_routes = Router::new().route("/token", post(issue_token));

    let protected_routes = Router::new()
        .route("/users/me", get(read_users_me))
        .route("/users/me/items", get(read_own_items))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
