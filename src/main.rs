use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use curecast_core::{CoreConfig, PredictionService};

/// Main entry point for the CureCast application
///
/// Loads the trained artifact and the disease catalog, then serves the REST API. Both inputs
/// are loaded before the listener binds, so the server never accepts a request while
/// partially initialised.
///
/// # Environment Variables
/// - `CURECAST_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `CURECAST_ARTIFACT_PATH`: trained model artifact (default: "curecast_model.json")
/// - `CURECAST_DISEASE_CSV_PATH`: disease reference table (default: "disease_list_with_counts.csv")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - either input is missing, unreadable or malformed,
/// - the server address cannot be parsed or bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("curecast_run=info".parse()?)
                .add_directive("curecast_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("CURECAST_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:5000".into())
        .parse()?;

    let cfg = CoreConfig::from_env_values(
        std::env::var("CURECAST_ARTIFACT_PATH").ok(),
        std::env::var("CURECAST_DISEASE_CSV_PATH").ok(),
    )?;
    for (label, path) in [
        ("Model artifact", cfg.artifact_path()),
        ("Disease catalog", cfg.disease_csv_path()),
    ] {
        if !path.is_file() {
            anyhow::bail!("{} does not exist: {}", label, path.display());
        }
    }

    let service = PredictionService::from_config(&cfg)?;
    tracing::info!(
        "++ Loaded {} symptoms from artifact",
        service.vocabulary().len()
    );

    let app = router(AppState::new(service));

    tracing::info!("++ Starting CureCast REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
