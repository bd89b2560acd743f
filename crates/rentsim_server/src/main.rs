use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod contact;
mod error;
mod handlers;
mod models;
mod routes;
mod validation;

use contact::{AppState, LogContactSink};

#[derive(Parser, Debug)]
#[command(name = "rentsim_server")]
#[command(about = "Market data and contact service for the rental simulator")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:3001")]
    bind: SocketAddr,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Simulated processing time of a contact request, in milliseconds
    #[arg(long, default_value_t = 600)]
    contact_delay_ms: u64,
}

fn init_logging(level: &str) {
    let default_filter = format!("rentsim_server={level},tower_http={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let state = AppState::new(
        Arc::new(LogContactSink),
        Duration::from_millis(args.contact_delay_ms),
    );
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
    }
}
