use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::projects;
use super::handlers::sessions;
use super::handlers::users;
use super::middleware::authenticate as auth_middleware;
use crate::domain::project::ports::ProjectServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<dyn SessionServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub project_service: Arc<dyn ProjectServicePort>,
    pub token_issuer: Arc<TokenIssuer>,
}

/// Cross-origin access for the listed origins only, cookies included, so the
/// browser client can send the `jwt` refresh cookie.
fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn create_router(
    state: AppState,
    request_timeout: Duration,
    allowed_origins: Vec<HeaderValue>,
) -> Router {
    let public_routes = Router::new()
        .route("/auth", post(sessions::login))
        .route("/auth/signup", post(sessions::signup))
        .route("/auth/refresh", get(sessions::refresh))
        .route("/auth/logout", post(sessions::logout));

    let protected_routes = Router::new()
        .route(
            "/users",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/notes", patch(users::update_notes))
        .route("/projects", post(projects::create_project))
        .route(
            "/projects/:project_id",
            get(projects::get_project).delete(projects::delete_project),
        )
        .route("/projects/:project_id/name", patch(projects::rename_project))
        .route(
            "/projects/:project_id/projectCharter",
            patch(projects::update_project_charter),
        )
        .route("/projects/:project_id/endDate", put(projects::update_end_date))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
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
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}
