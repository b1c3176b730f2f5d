use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use xptrack::{bridge::run_stdio, SettingsStore, TrackerController};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("xptrack starting up...");

    let project_dirs = directories::ProjectDirs::from("", "", "xptrack")
        .context("could not determine a data directory")?;
    let data_dir = project_dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    let settings = Arc::new(SettingsStore::new(data_dir.join("settings.json"))?);

    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let controller = TrackerController::new(outbound_tx, events_tx, settings);

    let cancel_token = CancellationToken::new();
    {
        let cancel_token = cancel_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel_token.cancel();
            }
        });
    }

    controller.start().await;
    run_stdio(controller, outbound_rx, events_rx, cancel_token).await
}
