use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use storage::{Database, repository::MemoryWorkoutStore};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use web::{
    config::{Config, StorageBackend},
    features::workouts::handlers,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_workouts,
        handlers::get_workout_stats,
        handlers::get_workout,
        handlers::create_workout,
        handlers::update_workout,
        handlers::delete_workout,
    ),
    components(
        schemas(
            storage::dto::workout::WorkoutPayload,
            storage::dto::common::Empty,
            storage::dto::common::ErrorMessage,
            storage::dto::common::ErrorResponse,
            storage::models::Workout,
            storage::models::WorkoutInput,
            storage::models::WorkoutStats,
        )
    ),
    tags(
        (name = "workouts", description = "Workout log endpoints"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting workout API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let (state, database) = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;

            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(database_url)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");

            tracing::info!("Running database migrations");
            db.run_migrations()
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Database migrations completed successfully");

            (AppState::new(db.workouts()), Some(db))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, workouts are lost on shutdown");
            (AppState::new(MemoryWorkoutStore::new()), None)
        }
    };

    let bind_address = config.bind_address();

    let app = web::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.client_url.as_deref())?);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = database {
        db.close().await;
        tracing::info!("Database connection closed");
    }
    tracing::info!("Server stopped");

    Ok(())
}

fn cors_layer(client_url: Option<&str>) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    match client_url {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("CLIENT_URL '{}' is not a valid origin", origin))?;
            Ok(cors.allow_origin(origin))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
