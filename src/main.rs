use anyhow::Result;
use clap::Parser;
use jobs_portal::{start_web_server, ConfigManager};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sarkari-portal")]
#[command(about = "Server-rendered government jobs portal")]
struct Cli {
    /// Override PORTAL_PORT
    #[arg(long)]
    port: Option<u16>,

    /// Override JOBS_API_URL
    #[arg(long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobs_portal=info,rocket::server=off")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ConfigManager::load()?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(backend_url) = cli.backend_url {
        config.backend.base_url = backend_url.trim_end_matches('/').to_string();
    }

    info!("Starting jobs portal");
    info!("Server: http://0.0.0.0:{}", config.server.port);
    info!("Job service: {}", config.backend.base_url);

    start_web_server(config).await
}
