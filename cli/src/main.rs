//! Vimeet terminal client binary.
//!
//! Entry point that joins a room and drives it from stdin.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vimeet_cli::{report, CliConfig, Command, Flow};
use vimeet_sdk::RoomClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vimeet_sdk=debug,vimeet_cli=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = CliConfig::from_env();
    config.validate()?;

    info!("Starting Vimeet client");
    info!("Origin: {}", config.origin);
    info!("Room: {}", config.room);
    info!("Username: {}", config.username);

    let client = RoomClient::new(config.ws_config())?;
    report::subscribe(client.store());
    client.connect(&config.username, &config.room).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("End of input");
                    break;
                };

                match Command::parse(&line) {
                    Ok(Some(command)) => match command.execute(client.engine()) {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Quit) => break,
                        Err(e) => warn!("Command failed: {}", e),
                    },
                    Ok(None) => {}
                    Err(e) => warn!("{}", e),
                }
            }
        }
    }

    info!("Leaving room");
    client.close();

    // Let the writer flush the close frame.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let metrics = client.engine().metrics();
    info!(
        "Frames received: {}, applied: {}, dropped: {}; commands sent: {}",
        metrics.frames_received(),
        metrics.frames_applied(),
        metrics.frames_dropped(),
        metrics.commands_sent()
    );

    Ok(())
}
