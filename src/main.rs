//! Command-line entry point: runs one treasure hunt for one Telegram chat.

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use treasure_hunt::config::GameConfig;
use treasure_hunt::game::GameState;
use treasure_hunt::poll::{PollCursor, PollLoop};
use treasure_hunt::transport::TelegramBot;

/// Play a treasure hunt over a Telegram bot.
#[derive(Debug, Parser)]
#[command(name = "treasure-hunt", version, about)]
struct Cli {
    /// Bot access token
    token: String,

    /// Destination chat identifier
    chat: String,

    /// TOML file overriding the default game settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Let "where" reveal the treasure (operator testing only)
    #[arg(long)]
    debug: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    config.debug |= cli.debug;
    Ok(config.validated()?)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    info!(
        tolerance = config.tolerance,
        attempts = config.attempts,
        distance_error = config.distance_error,
        debug = config.debug,
        "configuration loaded"
    );

    let interval = config.poll_interval();
    let initial = GameState::intro(cli.chat.clone(), Arc::new(config));
    let source = TelegramBot::new(cli.token.clone(), cli.chat.clone());
    let notifier = TelegramBot::new(cli.token, cli.chat);

    let poll = PollLoop::new(
        initial,
        source,
        notifier,
        StdRng::from_os_rng(),
        PollCursor::starting_now(),
        interval,
    );

    match poll.run() {
        Err(e) => Err(e).context("poll loop stopped"),
        Ok(never) => match never {},
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
