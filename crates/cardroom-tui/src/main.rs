use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cardroom_client::watchdog::{ReconnectPolicy, WsConnector};
use cardroom_core::protocol::Frame;
use cardroom_core::style::Style;
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

mod client;
mod tui;

#[derive(Parser)]
#[command(name = "cardroom")]
#[command(about = "Sit at a cardroom table from the terminal", long_about = None)]
struct Cli {
    /// Table WebSocket URL, e.g. ws://127.0.0.1:8000/ws/cash-game/1/
    #[arg(short, long, required_unless_present = "replay")]
    url: Option<String>,

    /// Felt style JSON (colors, sizes, timers)
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// Frame JSON to show until the server sends one
    #[arg(short, long)]
    frame: Option<PathBuf>,

    /// Session cookie sent with the socket handshake, e.g. "sessionid=abc"
    #[arg(short, long)]
    cookie: Option<String>,

    /// Browse a hand history file instead of joining a table
    #[arg(short, long, conflicts_with = "url")]
    replay: Option<PathBuf>,

    /// Write logs here (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Give up after this many failed reconnects (default: keep trying)
    #[arg(long)]
    max_reconnects: Option<u32>,
}

/// The terminal belongs to the UI, so logs only go to a file.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()).into())
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let style: Option<Style> = cli.style.as_deref().map(read_json::<Style>).transpose()?;

    if let Some(path) = &cli.replay {
        let text = fs::read_to_string(path)?;
        let replay = client::parse_replay(&text, style)?;
        return client::start_replay(replay).await;
    }

    let Some(url) = cli.url else {
        return Err("a table --url is required".into());
    };
    let style = style.unwrap_or_default();
    let seed: Frame = match &cli.frame {
        Some(path) => read_json(path)?,
        None => Frame::default(),
    };
    let policy = ReconnectPolicy::from_style(&style).with_max_attempts(cli.max_reconnects);
    let connector = WsConnector { cookie: cli.cookie };

    client::start_client(&url, connector, style, seed, policy).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
