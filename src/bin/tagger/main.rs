use anyhow::{Context, Result};
use clap::Parser;
use classification_remediation::{
    app::{create_s3_app, AppConfig},
    domain::models::StorageEvent,
    ports::services::TaggingService,
};
use std::io::Read;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "classification-tagger")]
#[command(about = "Tags classified objects and installs retention policies", long_about = None)]
struct Cli {
    /// Path to the storage event document, or '-' to read from stdin
    #[arg(short, long, default_value = "-")]
    event: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn init_logging(&self) {
        let filter =
            EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    fn read_event(&self) -> Result<String> {
        if self.event == "-" {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read event from stdin")?;
            Ok(raw)
        } else {
            std::fs::read_to_string(&self.event)
                .with_context(|| format!("failed to read event from {}", self.event))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    // Configuration is fatal before any record is touched
    let config = AppConfig::from_env().context("invalid configuration")?;

    let raw = cli.read_event()?;
    let event: StorageEvent =
        serde_json::from_str(&raw).context("malformed storage event document")?;

    let services = create_s3_app(config)
        .await
        .context("failed to build application")?;

    let summary = services.tagging_service.process_event(&event).await?;

    info!(
        records = summary.records,
        remediated = summary.remediated,
        below_threshold = summary.below_threshold,
        empty_objects = summary.empty_objects,
        missing_resources = summary.missing_resources,
        tagging_failures = summary.tagging_failures,
        lifecycle_failures = summary.lifecycle_failures,
        "event processed"
    );

    Ok(())
}
