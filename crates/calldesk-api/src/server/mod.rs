//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use calldesk_common::auth::{ElevatedPin, JwtService};
use calldesk_common::{AppConfig, AppError};
use calldesk_db::{
    create_pool, PgBotProfileRepository, PgCallRecordRepository, PgNotificationRepository,
    PgPrincipalRepository, PgServiceFlagRepository,
};
use calldesk_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    // Health endpoints skip the rate limiter so orchestration probes never
    // get throttled
    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = calldesk_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.access_secret,
        &config.jwt.refresh_secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let elevated_pin = Arc::new(ElevatedPin::from_phc(
        config.security.elevated_pin_hash.clone(),
    ));

    let service_context = ServiceContextBuilder::new()
        .principal_repo(Arc::new(PgPrincipalRepository::new(pool.clone())))
        .call_repo(Arc::new(PgCallRecordRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .bot_profile_repo(Arc::new(PgBotProfileRepository::new(pool.clone())))
        .service_flag_repo(Arc::new(PgServiceFlagRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .elevated_pin(elevated_pin)
        .accounting_mode(config.security.accounting_mode)
        .build()
        .map_err(AppError::Config)?;

    Ok(AppState::new(service_context, config, pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
