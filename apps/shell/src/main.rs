mod commands;

use album::domain::config::{AlbumConfig, LoggingConfig};
use album::domain::registry::find;
use album::events::EventBus;
use album::features::members::{MemberSnapshot, Members};
use album::kernel::config::load_album_config;
use album_logger::{LevelFilter, Logger, parse_level};
use anyhow::{Context, anyhow};
use commands::Command;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg: AlbumConfig = load_album_config(std::env::args().nth(1))
        .context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;

    let events = EventBus::new();
    let slices =
        album::init(&cfg, &events).map_err(|e| anyhow!("Album bootstrap failed: {e}"))?;
    let members = find::<Members>(&slices).context("Members slice is not enabled")?;

    let watcher = tokio::spawn(watch_snapshots(members.store.subscribe()?));
    let outcome = run(members).await;

    drop(slices);
    let _ = events.shutdown();
    watcher.abort();
    outcome
}

fn init_logger(logging: &LoggingConfig) -> anyhow::Result<Logger> {
    let level: LevelFilter = parse_level(&logging.level)?;
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).console(logging.console);
    let builder = if logging.directives.is_empty() {
        builder
    } else {
        builder.directives(logging.directives.join(","))
    };

    let logger = match &logging.path {
        Some(path) => builder.path(path).json(logging.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

/// Reads commands from stdin until `quit` or end of input.
async fn run(members: &Members) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"Church member album. Type 'help' for commands.\n").await?;
    while let Some(line) = lines.next_line().await? {
        let reply = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => command.execute(members).unwrap_or_else(|e| format!("Error: {e:#}")),
            Err(e) => format!("Error: {e:#}"),
        };
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!(members = members.store.len(), "Leaving album shell");
    Ok(())
}

async fn watch_snapshots(mut rx: watch::Receiver<Arc<MemberSnapshot>>) {
    while rx.changed().await.is_ok() {
        let snapshot = Arc::clone(&rx.borrow_and_update());
        info!(version = snapshot.version, members = snapshot.members.len(), "Album changed");
    }
    warn!("Snapshot channel closed");
}
