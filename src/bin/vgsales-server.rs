//! Video game sales dashboard server
//!
//! Serves the dashboard page and its chart endpoint on a local port.

use std::path::Path;

use anyhow::Context;
use vgsales_dashboard::server::run_server;
use vgsales_dashboard::{DEFAULT_DATASET_PATH, load_file};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let dataset = load_file(Path::new(DEFAULT_DATASET_PATH)).inspect_err(|e| {
        log::error!("Failed to load {DEFAULT_DATASET_PATH}: {e:#}");
    })?;

    // Get host and port from environment or use defaults
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8050".to_string())
        .parse()
        .context("PORT must be a number")?;

    run_server(dataset, &host, port).await?;
    Ok(())
}
