use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_api::config::{GeneratorConfig, ServerConfig};
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_blob::HttpBlobStore;
use atelier_core::styles::StyleRegistry;
use atelier_openai::ImagesClient;
use atelier_pipeline::{PgCatalog, Pipeline, PipelineConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let generator = GeneratorConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = atelier_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    atelier_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    atelier_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Generation pipeline ---
    let registry = Arc::new(StyleRegistry::new());
    let synthesizer = ImagesClient::with_endpoint(
        generator.openai_base_url.clone(),
        generator.openai_model.clone(),
        generator.openai_api_key.clone(),
        generator.retry_policy(),
    );
    let store = HttpBlobStore::with_timeout(
        generator.blob_base_url.clone(),
        generator.blob_token.clone(),
        std::time::Duration::from_secs(generator.upload_timeout_secs),
    );
    let pipeline = Pipeline::new(
        StyleRegistry::new(),
        Arc::new(synthesizer),
        Arc::new(store),
        Arc::new(PgCatalog::new(pool.clone())),
        PipelineConfig {
            upload_attempts: generator.upload_attempts,
            ..PipelineConfig::default()
        },
    );
    tracing::info!(model = %generator.openai_model, "Generation pipeline ready");

    // --- App state & router ---
    let state = AppState {
        pool,
        registry,
        pipeline: Arc::new(pipeline),
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolve when the process receives SIGINT (ctrl-c).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received");
}
