//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{auth, contact, dashboard, health, notifications, system, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(dashboard_routes())
        .merge(system_routes())
        .merge(user_routes())
        .merge(notification_routes())
        .merge(public_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/me", get(auth::me))
        .route("/auth/change-password", post(auth::change_password))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/verify-reset-code", post(auth::verify_reset_code))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/auth/verify-pin", post(auth::verify_pin))
}

/// Dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/call-logs", get(dashboard::call_logs))
        .route("/dashboard/call-logs/:record_id", get(dashboard::call_log_detail))
}

/// System routes
fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/system/status", get(system::status))
        .route("/system/toggle", post(system::toggle))
        .route("/system/bot-settings", get(system::bot_settings))
        .route("/system/bot-settings", post(system::update_bot_settings))
}

/// User administration routes (admin only, enforced per handler)
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list))
        .route("/users", post(users::create))
        .route("/users/pause-all", post(users::pause_all))
        .route("/users/resume-all", post(users::resume_all))
        .route("/users/broadcast", post(users::broadcast))
        .route("/users/:user_id", put(users::update))
        .route("/users/:user_id", delete(users::delete))
        .route("/users/:user_id/toggle", post(users::toggle))
        .route("/users/:user_id/pause", post(users::pause))
        .route("/users/:user_id/resume", post(users::resume))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/:notification_id/read", post(notifications::mark_read))
}

/// Public routes
fn public_routes() -> Router<AppState> {
    Router::new().route("/contact", post(contact::submit))
}
