use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_profile::update_profile;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;

/// Shared application state, generic over the repository port so tests can
/// wire an in-memory store while the binary wires Postgres.
pub struct AppState<UR: UserRepository> {
    pub auth_service: Arc<AuthService<UR>>,
    pub authenticator: Arc<Authenticator>,
}

impl<UR: UserRepository> Clone for AppState<UR> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<UR: UserRepository>(
    auth_service: Arc<AuthService<UR>>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login::<UR>))
        .route("/api/auth/register", post(register::<UR>));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(current_user::<UR>))
        .route("/api/auth/me", patch(update_profile::<UR>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UR>,
        ));

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
