use anyhow::{Context, Result};
use clap::Parser;
use classification_remediation::{
    adapters::inbound::provisioning::{handle_request, report_init_failure},
    adapters::outbound::provisioning::HttpProvisioningCallback,
    app::{create_s3_app, AppConfig},
    domain::models::ProvisioningRequest,
};
use std::io::Read;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "notification-configurator")]
#[command(about = "Installs or removes bucket event-notification configurations", long_about = None)]
struct Cli {
    /// Path to the provisioning request document, or '-' to read from stdin
    #[arg(short, long, default_value = "-")]
    request: String,

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

    fn read_request(&self) -> Result<String> {
        if self.request == "-" {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read request from stdin")?;
            Ok(raw)
        } else {
            std::fs::read_to_string(&self.request)
                .with_context(|| format!("failed to read request from {}", self.request))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    let raw = cli.read_request()?;
    let request: ProvisioningRequest =
        serde_json::from_str(&raw).context("malformed provisioning request document")?;

    let callback = HttpProvisioningCallback::new();

    // Setup failures are reported through the callback so the provisioning
    // system receives a well-formed FAILED signal instead of a timeout
    match create_s3_app(AppConfig::default()).await {
        Ok(services) => {
            handle_request(&services.notification_service, &callback, &request)
                .await
                .context("failed to deliver provisioning response")?;
        }
        Err(e) => {
            error!(error = %e, "failed to build application");
            report_init_failure(&callback, &request, &e.to_string())
                .await
                .context("failed to deliver provisioning response")?;
        }
    }

    Ok(())
}
