//! Roster engine HTTP server.

use clap::Parser;
use tracing::info;

use roster_engine::api::{AppState, create_router};
use roster_engine::config::ConfigLoader;

/// Roster Engine Server - roster generation and comp-off accounting over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory of team roster rule files (*.yaml, *.yml, *.json)
    #[arg(short, long, default_value = "./config/teams")]
    config_dir: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Roster Engine Server");

    let config = ConfigLoader::load(&args.config_dir)?;
    info!(
        config_dir = %args.config_dir,
        teams = config.team_ids().count(),
        "Loaded team roster rules"
    );

    let app = create_router(AppState::new(config));

    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
