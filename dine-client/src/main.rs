//! dine-dashboard - terminal dashboard for the AutoDine host

use anyhow::Context;
use dine_client::dashboard::read_keys;
use dine_client::{ClientConfig, DashboardShell, TerminalScreen, TerminalView, logger};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = ClientConfig::from_env();
    logger::init_logger_with_file(Some(&config.log_level), &config.log_dir);

    tracing::info!(
        host = %config.base_url,
        poll_ms = config.poll_interval.as_millis() as u64,
        "Starting dine-dashboard"
    );

    let client = config
        .build_http_client()
        .context("Failed to build HTTP client")?;

    let shutdown = CancellationToken::new();
    let (commands_tx, commands_rx) = mpsc::channel::<String>(16);

    let screen = Arc::new(Mutex::new(
        TerminalScreen::enter().context("Failed to set up terminal")?,
    ));

    let keys = tokio::task::spawn_blocking({
        let screen = screen.clone();
        let shutdown = shutdown.clone();
        move || read_keys(screen, commands_tx, shutdown)
    });

    // raw mode swallows Ctrl-C as a key; this covers signals from elsewhere
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, shutting down");
        }
        ctrl_c.cancel();
    });

    let mut shell = DashboardShell::new(
        Arc::new(client),
        config.poll_interval,
        TerminalView::new(screen.clone()),
    );
    shell.run(commands_rx, shutdown.clone()).await;
    shutdown.cancel();

    match keys.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(error = %e, "Key reader failed"),
        Err(e) => tracing::warn!(error = %e, "Key reader task panicked"),
    }

    screen
        .lock()
        .map_err(|_| anyhow::anyhow!("terminal screen lock poisoned"))?
        .leave()
        .context("Failed to restore terminal")?;

    Ok(())
}
