//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use analyzer::{AnalyzerConfig, GeminiClient, PgHistoryRepository, analyzer_router};
use anyhow::Context;
use auth::PgAuthRepository;
use auth::presentation::{AuthAppState, resolve_current_user};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use payments::{
    DarajaClient, ExpirePendingUseCase, PaymentsConfig, PgPaymentsRepository, payments_router,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,analyzer=info,payments=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Adapter configuration, read once
    let analyzer_config = AnalyzerConfig::from_env();
    let payments_config = PaymentsConfig::from_env();

    if !analyzer_config.has_api_key() {
        tracing::warn!("GEMINI_API_KEY is not set; essay analysis will fail");
    }
    tracing::debug!(config = ?payments_config, "Payments configuration loaded");

    let auth_repo = PgAuthRepository::new(pool.clone());
    let history_repo = PgHistoryRepository::new(pool.clone());
    let payments_repo = PgPaymentsRepository::new(pool.clone());

    // Startup maintenance: fail PENDING payments whose callback never came
    // Errors here should not prevent server startup
    let expire_pending =
        ExpirePendingUseCase::new(Arc::new(payments_repo.clone()), payments_config.pending_ttl);
    match expire_pending.execute().await {
        Ok(expired) => {
            tracing::info!(expired, "Pending payment sweep completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Pending payment sweep failed, continuing anyway"
            );
        }
    }

    let gemini = GeminiClient::new(&analyzer_config)?;
    let daraja = DarajaClient::new(&payments_config)?;

    // Build router
    let api = Router::new()
        .nest("/auth", auth::auth_router(auth_repo.clone()))
        .merge(analyzer_router(history_repo, gemini, analyzer_config))
        .merge(payments_router(payments_repo, daraja, payments_config));

    let app = Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            AuthAppState::new(auth_repo),
            resolve_current_user::<PgAuthRepository>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    // Start server
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("Invalid BIND_ADDR: {bind_addr}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn cors_layer() -> CorsLayer {
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}
