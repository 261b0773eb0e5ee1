use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use llm_relay::{server, AppState, LlmProxy, ProviderConfig};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "llm-relay")]
#[command(about = "Item list and OpenAI-compatible prompt relay")]
struct Cli {
    #[arg(long, env = "LLM_RELAY_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "LLM_RELAY_PORT", default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = ProviderConfig::from_env();
    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; /api/llm will answer 400 until it is");
    }

    info!(
        host = %cli.host,
        port = cli.port,
        endpoint = %config.endpoint(),
        default_model = %config.default_model,
        "Starting llm-relay"
    );

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("Invalid address: {}:{}", cli.host, cli.port))?;

    let proxy = LlmProxy::from_config(config).context("Failed to build provider client")?;

    server::serve(AppState::new(proxy), addr)
        .await
        .context("Server error")
}
