use clap::Parser;
use feature_search::config::ServerConfig;
use feature_search::ingestion;
use feature_search::query::router;
use feature_search::registry::InterfaceRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "feature-search", version, about = "Place search over local vector datasets")]
struct Args {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long, env = "FEATURE_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ServerConfig::load(args.config)?;
    if let Some(bind) = args.bind {
        config.server.listen_addr = bind;
    }
    let addr = config.socket_addr()?;

    tracing::info!(
        "Configured {} interface(s): {:?}",
        config.interfaces.len(),
        config.interfaces.keys().collect::<Vec<_>>()
    );

    // 1. Interfaces initialize in the background and appear as they become ready:
    let registry = InterfaceRegistry::new();
    let converter = ingestion::from_config(&config.converter);
    let timeout = config.converter.timeout_secs.map(Duration::from_secs);
    let tasks = registry.spawn_interfaces(config.definitions().cloned(), converter, timeout);
    let configured = tasks.len();
    let summary = Arc::clone(&registry);
    tokio::spawn(async move {
        for task in tasks {
            let _ = task.await;
        }
        tracing::info!(
            "{} of {} interface(s) ready: {:?}",
            summary.interface_count(),
            configured,
            summary.list_interfaces()
        );
    });

    // 2. Start HTTP server:
    let app = router(registry);

    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
