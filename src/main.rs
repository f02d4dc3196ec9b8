use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use fleetres::command;
use fleetres::config::Config;
use fleetres::engine::Engine;
use fleetres::notify::NotifyHub;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    fleetres::observability::init(config.metrics_port)?;

    let engine = Engine::new(Arc::new(NotifyHub::new()));
    for (category, count) in config.initial_units() {
        engine.add_units_of(category, count).await;
    }
    info!("fleetres ready");
    info!("  sedans: {}, suvs: {}, vans: {}", config.sedans, config.suvs, config.vans);
    info!("  cascade_removal: {}", config.cascade_removal);

    // One JSON command per line in, one JSON result per line out.
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let out = command::handle_line(&engine, line, config.cascade_removal).await;
        stdout.write_all(out.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
