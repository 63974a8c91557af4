//! UrbanPulse CLI
//!
//! Runs one planning pass for the configured city and writes the JSON report to
//! `simulation.output_path`, or stdout when unset. Logs go to stderr.

use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use urbanpulse::config::{LoggingConfig, Settings};
use urbanpulse::error::ErrorResponse;
use urbanpulse::runner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::load()?;

    // Initialize tracing subscriber for structured logging
    init_tracing(&settings.logging);

    info!("🚀 Starting UrbanPulse planning run...");
    info!("📋 Configuration loaded successfully");

    let report = match runner::run(&settings.simulation).await {
        Ok(report) => report,
        Err(err) => {
            let response = ErrorResponse::from(&err);
            error!("❌ Planning run failed: {}", serde_json::to_string(&response)?);
            std::process::exit(1);
        }
    };

    let json = report.to_json_pretty()?;
    match &settings.simulation.output_path {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            info!("💾 Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    info!("👋 Planning run complete");
    Ok(())
}

/// Initialize tracing; `RUST_LOG` wins over the configured filter
fn init_tracing(logging: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}
