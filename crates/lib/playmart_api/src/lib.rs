//! # playmart_api
//!
//! HTTP API library for PlayMart accounts: registration, login, and profiles.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use playmart_core::auth::service::AuthService;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{auth, health, profile};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Auth orchestrator over the configured credential store.
    pub auth: Arc<AuthService>,
    /// PostgreSQL pool, absent when running on the in-memory store.
    pub pool: Option<PgPool>,
}

/// Run embedded database migrations.
///
/// Delegates to `playmart_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    playmart_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(routes::GET_USERS_ME, get(profile::my_profile_handler))
        .route(routes::GET_USERS_ID, get(profile::user_profile_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .with_state(state)
}
