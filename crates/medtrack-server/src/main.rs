//! Medication tracker HTTP server.
//!
//! Serves the REST API over a SQLite-backed store. All state lives in the
//! database file; restarting the server loses nothing.

mod endpoints;
mod error;
mod extract;
mod router;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use medtrack_core::{MedTracker, ServiceConfig};

#[derive(Debug, StructOpt)]
#[structopt(name = "medtrack-server", about = "Medication tracker REST API")]
struct Options {
    /// Address to listen on.
    #[structopt(short, long, default_value = "127.0.0.1:5000")]
    listen: SocketAddr,

    /// Path to the SQLite database file. Created if missing.
    #[structopt(short, long, default_value = "./medications.db")]
    db_path: PathBuf,

    /// Decrement a medication's stock by one unit for each recorded dosage.
    #[structopt(long)]
    decrement_stock: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = Options::from_args();

    let config = ServiceConfig {
        decrement_stock_on_dosage: options.decrement_stock,
    };
    let tracker = MedTracker::open(&options.db_path, config)
        .with_context(|| format!("opening database at {}", options.db_path.display()))?;

    let app = router::app(Arc::new(tracker));

    let listener = tokio::net::TcpListener::bind(options.listen)
        .await
        .with_context(|| format!("binding {}", options.listen))?;
    tracing::info!(listen = %options.listen, db = %options.db_path.display(), "server started");

    axum::serve(listener, app).await?;

    Ok(())
}
