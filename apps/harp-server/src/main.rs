use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use harp_server::{router, AppState};
use harp_store::Store;

#[derive(Debug, Parser)]
#[command(name = "harp-server", about = "Harp secret store server")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Path to the SQLite database file.
    #[arg(long, env = "HARP_DATABASE", default_value = "harp.db")]
    database: PathBuf,

    /// Per-request timeout in seconds — slow store calls must not pile up.
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let store = Store::open(&args.database).await?;
    let app = router(
        AppState { store },
        Duration::from_secs(args.request_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(bind = %args.bind, database = %args.database.display(), "harp-server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
