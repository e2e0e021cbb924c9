use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use review_watchdog::api::StatusApiClient;
use review_watchdog::config::AppConfig;
use review_watchdog::notify::TelegramNotifier;
use review_watchdog::shutdown::wait_for_shutdown;
use review_watchdog::watch::{CycleOutcome, PollLoop, TracingSink};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "review-watchdog",
    about = "Poll homework review statuses and report changes to Telegram"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Initial lower bound of the poll window (unix seconds). Defaults to now.
    #[arg(long)]
    since: Option<i64>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match cli.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    let config = AppConfig::load(cli.config.as_deref())?;

    if let Err(e) = config.ensure_credentials() {
        tracing::error!(error = %e, "CRITICAL: required credentials are missing, refusing to start");
        return Err(e.into());
    }

    let source = StatusApiClient::new(&config.api)?;
    let notifier = TelegramNotifier::new(&config.telegram)?;
    let cursor = cli.since.unwrap_or_else(|| chrono::Utc::now().timestamp());

    tracing::info!(
        endpoint = %source.endpoint(),
        chat_id = %config.telegram.chat_id,
        cursor,
        "Starting review watchdog"
    );

    let mut poller = PollLoop::new(
        source,
        notifier,
        TracingSink,
        config.telegram.chat_id.clone(),
        cursor,
    );

    if cli.once {
        match poller.run_cycle().await {
            CycleOutcome::Reported { cursor, .. } => {
                tracing::info!(cursor, "Single cycle reported a status change");
            }
            CycleOutcome::Failed(classified) => {
                tracing::info!(
                    severity = ?classified.severity,
                    message = %classified.message,
                    "Single cycle finished without a status change"
                );
            }
        }
        return Ok(());
    }

    poller.run(wait_for_shutdown()).await;

    tracing::info!(cursor = poller.cursor(), "Review watchdog stopped");

    Ok(())
}
