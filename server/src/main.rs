//! # HR records HTTP service
//!
//! Serves the employee and timesheet listings, the create/edit form actions, a calendar feed of
//! timesheets and the uploaded photos and documents.
//!
//! The listener address, database file and upload directory are read from the configuration
//! file, see `hr::config`. Set `RUST_LOG` to change the log level, e.g. `RUST_LOG=debug`.
use anyhow::Result;
use env_logger::Env;
use hr::ApplicationRuntime;
use log::info;
use std::sync::Arc;

mod employees;
mod error;
mod listing;
mod routes;
mod timesheets;


#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let runtime = Arc::new(ApplicationRuntime::new()?);
    let settings = runtime.config().server.clone();
    info!(
        "Using database {} and uploads in {}",
        runtime.config().database.sqlite_path,
        runtime.uploads().root().display()
    );

    let app = routes::router(runtime);
    let listener = tokio::net::TcpListener::bind((settings.address.as_str(), settings.port)).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
