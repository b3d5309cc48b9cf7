mod check_cmd;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use ppeguard_config::GatewayConfig;
use ppeguard_gateway::{start_server, GatewayState};
use ppeguard_vision::HttpVisionClient;

#[derive(Parser)]
#[command(name = "ppeguard")]
#[command(about = "PPE compliance analysis gateway")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind the HTTP server to
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Validate the configuration and print a redacted summary
    Check,
    /// Query a running gateway's health endpoint
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ppeguard_config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = GatewayConfig {
                port: port.unwrap_or(config.port),
                bind_address: bind.unwrap_or(config.bind_address),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Check => {
            if !check_cmd::run(&config) {
                std::process::exit(1);
            }
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("ppeguard is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: GatewayConfig) -> Result<()> {
    let report = ppeguard_config::validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "config warning");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "config error");
        }
        bail!("refusing to start with an invalid configuration (run `ppeguard check`)");
    }

    info!(
        bind = %config.bind_address,
        port = config.port,
        provider = %config.provider,
        model = %config.model,
        "starting PPE gateway"
    );

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    let config = Arc::new(config);
    let backend = Arc::new(HttpVisionClient::from_config(&config));
    let state = GatewayState::new(config, backend);
    start_server(addr, state).await
}
