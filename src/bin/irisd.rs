//! irisd: iris classification daemon.
//!
//! Loads the model artifacts once, then serves the prediction API over
//! JSON/HTTP. A missing model aborts startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use iris_classifier::server::{self, Config};
use iris_classifier::{IrisError, ModelService};

/// irisd: iris species classification service.
#[derive(Parser)]
#[command(name = "irisd")]
#[command(version = iris_classifier::PKG_VERSION)]
#[command(about = "Iris classification API daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind to, overriding the config file.
    #[arg(long, env = "IRISD_ADDRESS")]
    address: Option<String>,

    /// Directory holding the model artifacts, overriding the config file.
    #[arg(long, env = "IRIS_MODEL_DIR")]
    model_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Load configuration, CLI flags win
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }
    if let Some(dir) = args.model_dir {
        config.model.dir = dir;
    }

    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| IrisError::Configuration(format!("Invalid address: {e}")))?;

    info!(version = iris_classifier::version_string(), %addr, "irisd starting");

    // Startup phase: the model must load before we accept requests
    let service = ModelService::new(config.model.artifact_paths());
    if let Err(e) = service.load() {
        error!(error = %e, "Failed to load model");
        return Err(e.into());
    }

    let app = server::router(Arc::new(service))
        .layer(server::cors_layer(&config.server.cors.allow_origins)?);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
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
}
