//! Filter cross-reference proxy.
//!
//! ```text
//!   Browser ──▶ listener ──▶ CORS / request-id / trace ──▶ handler
//!                                                            │
//!              /api/mann ── normalize ── GraphQL GET ──▶ mann-filter.com
//!              /api/wix  ── normalize ── GraphQL GET ──▶ wixfilters.com
//!              /api/img  ── allow-list ── GET ─────────▶ vendor image host
//!                                                            │
//!   Browser ◀── status + content-type + body + proxy headers ◀┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use filter_xref_proxy::config::{load_config, load_default};
use filter_xref_proxy::lifecycle::signals::trigger_on_signal;
use filter_xref_proxy::observability::{logging, metrics};
use filter_xref_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "filter-xref-proxy", version, about = "Filter cross-reference catalog proxy")]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long, env = "PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_default()?,
    };

    logging::init(&config.observability);

    tracing::info!("filter-xref-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        environment = ?config.environment,
        upstream_timeout_ms = config.timeouts.upstream_ms,
        config_file = ?args.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(trigger_on_signal(shutdown.clone()));

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
