//! Coachdesk access gateway binary
//!
//! Verifies backend-issued session tokens, resolves roles, and serves the
//! role-gated module API.

use clap::Parser;
use coachdesk_rs::config::{GatewayConfig, LogFormat};
use coachdesk_rs::server;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gateway", version, about = "Role-gated access gateway for the Coachdesk dashboard")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config/gateway.yaml", env = "GATEWAY_CONFIG")]
    config: String,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match GatewayConfig::load(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    if args.check {
        println!("Configuration OK: {}", args.config);
        return ExitCode::SUCCESS;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &GatewayConfig) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
