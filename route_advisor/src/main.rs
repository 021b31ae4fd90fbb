pub(crate) mod bootstrap;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod render;

use std::path::PathBuf;

use bootstrap::fetch_initial_atis;
use clap::Parser;
use error::ApplicationResult;
use ptfs_feed::{
    Coordinator, FlightPlanFilter, NotificationSink, StreamClient, WebSocketConnector,
    stream::TokioDelay,
};
use render::LogSink;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AdvisorConfig;

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[clap(long, short)]
    /// Use this config file instead of the one in the user config folder
    config: Option<PathBuf>,
    #[clap(long)]
    /// Resets the config file in the user config folder to the defaults
    clean_config: bool,
    #[clap(long)]
    /// Go straight to streaming without fetching the current ATIS list
    skip_bootstrap: bool,
}

async fn run(cli: Cli) -> ApplicationResult<()> {
    let config = AdvisorConfig::load(cli.config.as_deref(), cli.clean_config)?;
    let routes = config.load_routes()?;
    info!(
        routes = routes.len(),
        pairs = config.route_pairs.len(),
        "Loaded route table"
    );

    let filter = FlightPlanFilter::new(&config.flight_plan_marker);
    let mut sink = LogSink::new(config.airport_names.clone(), filter.marker());
    let mut coordinator = Coordinator::new(config.route_pairs.clone(), routes, filter);
    coordinator.set_routing_enabled(config.routing_enabled);

    if !cli.skip_bootstrap {
        match fetch_initial_atis(&config.atis_url).await {
            Ok(advisories) => {
                info!("Loaded {} ATIS entries", advisories.len());
                for advisory in &advisories {
                    for notification in coordinator.handle_advisory(advisory) {
                        sink.deliver(notification).await;
                    }
                }
            }
            Err(e) => warn!("Failed to fetch initial ATIS, continuing without: {e}"),
        }
    }

    let mut client = StreamClient::with_delay(
        WebSocketConnector::new(&config.stream_url),
        TokioDelay,
        config.reconnect_delay(),
    );
    client
        .run_until(&mut coordinator, &mut sink, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Unable to listen for shutdown signal: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await;
    Ok(())
}

fn main() -> ApplicationResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
