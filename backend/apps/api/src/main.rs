//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use ai::{AiGateway, GeminiBackend};
use articles::{InMemoryArticleRepository, PgArticleRepository};
use auth::application::SeedOwnerUseCase;
use auth::domain::repository::UserRepository;
use auth::{AuthConfig, InMemoryUserRepository, PgUserRepository};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::build_app;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,articles=info,ai=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let auth_config = Arc::new(config.auth);

    // Unconfigured AI is logged by the gateway and never stops startup
    let gateway = Arc::new(AiGateway::new(GeminiBackend::from_config(&config.ai)?));

    let app = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let users = Arc::new(PgUserRepository::new(pool.clone()));
            seed_owner(users.clone(), auth_config.clone()).await?;
            let articles = Arc::new(PgArticleRepository::new(pool));
            build_app(users, articles, gateway, auth_config)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            let users = Arc::new(InMemoryUserRepository::new());
            seed_owner(users.clone(), auth_config.clone()).await?;
            let articles = Arc::new(InMemoryArticleRepository::new());
            build_app(users, articles, gateway, auth_config)
        }
    };

    let app = with_http_layers(app, &config.frontend_origins);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn seed_owner<R>(users: Arc<R>, config: Arc<AuthConfig>) -> anyhow::Result<()>
where
    R: UserRepository,
{
    SeedOwnerUseCase::new(users, config)
        .execute()
        .await
        .map_err(|e| anyhow::anyhow!("Owner seeding failed: {e}"))?;
    Ok(())
}

fn with_http_layers(app: Router, frontend_origins: &[String]) -> Router {
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}
