use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use quantdash::{AppState, Dashboard};
use quantdash_core::QuantConnector;
use quantdash_mock::MockConnector;
use quantdash_yahoo::YahooConnector;

/// Single-page quantitative stock dashboard.
#[derive(Debug, Parser)]
#[command(name = "quantdash", version, about)]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "QUANTDASH_ADDR", default_value = "127.0.0.1:8501")]
    addr: SocketAddr,

    /// Market data provider.
    #[arg(long, env = "QUANTDASH_PROVIDER", value_enum, default_value_t = Provider::Yahoo)]
    provider: Provider,

    /// Per-request provider timeout in seconds.
    #[arg(long, env = "QUANTDASH_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Provider {
    /// Yahoo Finance over HTTPS.
    Yahoo,
    /// Built-in deterministic fixtures (AAPL, MSFT).
    Mock,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let timeout = Duration::from_secs(args.timeout_secs.max(1));

    let connector: Arc<dyn QuantConnector> = match args.provider {
        Provider::Yahoo => Arc::new(YahooConnector::new_default(timeout)?),
        Provider::Mock => Arc::new(MockConnector::new()),
    };
    tracing::info!(provider = ?args.provider, connector = connector.name(), "provider selected");

    let dashboard = Dashboard::builder()
        .with_connector(connector)
        .provider_timeout(timeout)
        .build()?;

    quantdash::server::serve(args.addr, AppState::new(dashboard)).await?;
    Ok(())
}
