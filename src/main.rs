//! Shappe Haptic - Haptic Feedback API
//!
//! HTTP service converting text into haptic vibration patterns.
//!
//! # Usage
//!
//! ```bash
//! # Run the HTTP server (default 0.0.0.0:5000)
//! cargo run --release
//!
//! # Override bind address and config file
//! ./shappe-haptic --addr 127.0.0.1:8080 --config ./haptic_config.toml
//!
//! # One-shot translation to stdout
//! ./shappe-haptic translate "SOS" --speed 1.5
//! ```
//!
//! # Environment Variables
//!
//! - `HAPTIC_CONFIG`: Path to the TOML config file
//! - `HAPTIC_SERVER_ADDR`: Bind address (overrides the config file)
//! - `HAPTIC_CORS_ORIGINS`: Comma-separated allowed CORS origins
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use shappe_haptic::api::{create_app, AppState};
use shappe_haptic::config::{self, LogFormat, ServiceConfig};
use shappe_haptic::{HapticTranslator, TraceId, TranslationCache, TranslationRequest};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "shappe-haptic")]
#[command(about = "Haptic Feedback API - text to vibration pattern translation")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:5000")
    #[arg(short, long, env = "HAPTIC_SERVER_ADDR")]
    addr: Option<String>,

    /// Path to the TOML config file
    #[arg(short, long, env = "HAPTIC_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Translate text once and print the pattern as JSON
    Translate {
        /// Text to translate
        text: String,
        /// Speed factor (0.1-3.0, lower = slower)
        #[arg(long)]
        speed: Option<f64>,
        /// Vibration intensity (0.0-1.0)
        #[arg(long)]
        intensity: Option<f64>,
    },
}

// ============================================================================
// Logging
// ============================================================================

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init(),
    }
}

// ============================================================================
// Modes
// ============================================================================

fn run_translate(
    config: &ServiceConfig,
    text: String,
    speed: Option<f64>,
    intensity: Option<f64>,
) -> Result<()> {
    let translator = HapticTranslator::new(
        Arc::new(TranslationCache::new()),
        config.translation.to_settings(),
    );
    let request = TranslationRequest {
        text,
        speed_factor: speed,
        intensity,
        use_cache: false,
    };

    let result = translator
        .translate(&request, &TraceId::generate())
        .context("Translation failed")?;
    info!(
        vibrations = result.vibration_count(),
        total_duration_ms = result.total_duration_ms,
        "Translated text"
    );
    let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
    println!("{json}");
    Ok(())
}

async fn run_server(config: &ServiceConfig, server_addr: &str) -> Result<()> {
    let state = AppState::from_config(config);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(server_addr)
        .await
        .with_context(|| format!("Failed to bind to {server_addr}"))?;
    info!("HTTP server listening on {}", server_addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await;

    match result {
        Ok(()) => {
            info!("Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(anyhow::anyhow!("HTTP server error: {}", e))
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // The log format may come from the config file, but config loading
    // itself logs, so peek at the file before the subscriber exists.
    let format_hint = ServiceConfig::peek_log_format(args.config.as_deref());
    init_logging(if args.log_json { LogFormat::Json } else { format_hint });

    let service_config = ServiceConfig::load_from(args.config.as_deref());
    config::init(service_config);
    let service_config = config::get();

    if let Some(SubCommand::Translate {
        text,
        speed,
        intensity,
    }) = args.command
    {
        return run_translate(service_config, text, speed, intensity);
    }

    let server_addr = args.addr.unwrap_or_else(|| service_config.server.addr.clone());

    info!("Shappe Haptic - Haptic Feedback API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        max_entries = service_config.cache.max_entries,
        default_speed = service_config.translation.default_speed,
        default_intensity = service_config.translation.default_intensity,
        "Translation settings"
    );

    run_server(service_config, &server_addr).await?;

    info!("Shutdown complete");
    Ok(())
}
