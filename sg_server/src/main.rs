//! Headless Set table runner.
//!
//! Starts one game with a bot behind every player, renders table events as
//! log lines and exits once the winners are announced.

mod config;
mod logging;
mod metrics;
mod ui;

use std::sync::Arc;

use anyhow::Error;
use config::{Overrides, ServerConfig};
use ctrlc::set_handler;
use pico_args::Arguments;
use set_game::{GameSession, SetRules};
use tracing::info;
use ui::LogUi;

const HELP: &str = "\
Run a Set table with bot players

USAGE:
  sg_server [OPTIONS]

OPTIONS:
  --players       N          Number of players              [default: env PLAYERS or 2]
  --timeout       SECS       Round length before a reshuffle [default: env TURN_TIMEOUT_SECS or 60]
  --metrics-bind  IP:PORT    Serve Prometheus metrics        [default: env METRICS_BIND, off]

FLAGS:
  --hints                    Log the sets on the table after every refill
  -h, --help                 Print help information

ENVIRONMENT:
  TABLE_SIZE, FEATURE_SIZE, FEATURE_COUNT, DECK_SIZE
  TURN_TIMEOUT_WARNING_SECS, POINT_FREEZE_SECS, PENALTY_FREEZE_SECS
  END_GAME_PAUSE_SECS, BOT_THINK_TIME_MS, HINTS
  Any of these may also be set in a .env file
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let overrides = Overrides::from_args(pargs)?;
    let config = ServerConfig::from_env(overrides)?;
    config.validate()?;

    logging::init();

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(Error::msg)?;
        info!("Serving metrics at http://{}/metrics", addr);
    }

    let game = config.game;
    info!(
        "Starting game: {} players, {} slots, {} cards",
        game.players, game.table_size, game.deck_size
    );

    let rules = SetRules::new(game.feature_size, game.feature_count);
    let session = GameSession::start(game, Arc::new(rules), Arc::new(LogUi::new(rules)))?;

    // Catching signals for a graceful stop.
    let termination = session.termination();
    set_handler(move || {
        info!("Interrupted, terminating game");
        termination.set();
    })?;

    let winners = session.wait().await?;
    info!("Game over, winners: {:?}", winners);

    Ok(())
}
