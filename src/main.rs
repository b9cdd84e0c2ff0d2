//! Gophermart TUI - a terminal client for the Gophermart loyalty service.

use anyhow::Context;
use gophermart_tui::{App, Config, config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The terminal belongs to the UI, so logs go to a file
    let log_dir = config::log_dir().context("locating log directory")?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "gophermart-tui.log"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gophermart_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    // Load configuration
    let config = Config::load_or_default().context("loading configuration")?;

    // Run the application
    let mut app = App::new(config).await.context("starting terminal UI")?;
    app.run().await?;

    Ok(())
}
