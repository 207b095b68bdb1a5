#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use dotenvy::dotenv;
use errors::ApplicationError;
use router::setup_router;
use state::AppState;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod db;
mod errors;
mod router;
mod state;

#[cfg(test)]
mod test;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    if let Err(e) = run().await {
        // Print the error using Display
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run() -> Result<(), ApplicationError> {
    setup_tracing();

    let (host, port, data_dir) = setup_env()?;

    std::fs::create_dir_all(&data_dir).map_err(|e| {
        ApplicationError::Internal(format!("Failed to create data directory: {}", e))
    })?;

    let db_path = data_dir.join("tally.db");
    let conn = db::open_db(&db_path)
        .map_err(|e| ApplicationError::Internal(format!("Failed to open database: {}", e)))?;

    let app = setup_router(AppState::new(conn));

    let address = format!("{}:{}", host, port);
    info!("Starting server on {}", address);

    let listener = TcpListener::bind(address)
        .await
        .map_err(ApplicationError::from)?;

    info!(
        "Listening on: {}",
        listener.local_addr().map_err(ApplicationError::from)?
    );

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ApplicationError::CannotServe)?;
    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}=debug,tower_http=debug",
                    crate_name = env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn setup_env() -> Result<(String, String, std::path::PathBuf), ApplicationError> {
    dotenv().ok();

    let host = std::env::var("TALLY_HOST")
        .map_err(|e| ApplicationError::EnvError(e, "TALLY_HOST".to_string()))?;
    let port = std::env::var("TALLY_PORT")
        .map_err(|e| ApplicationError::EnvError(e, "TALLY_PORT".to_string()))?;
    let data_dir = std::env::var("TALLY_DATA_DIR").unwrap_or_else(|_| "./data".to_string());

    Ok((host, port, std::path::PathBuf::from(data_dir)))
}
