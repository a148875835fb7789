//! # cardroom_sim
//!
//! Drives simulated games against a running cardroom server. Each game runs
//! on its own task and walks the server's three routes in order: create,
//! shuffle, then one deal per seated player.
//!
//! Two modes:
//!
//! - Interactive (default): reads commands from stdin. `y` asks for a count,
//!   a number launches that many games, `exit` or `n` quits.
//! - Scripted: `--games N` launches N games, waits for them, and exits.
//!
//! ```no_run
//! # async fn demo() {
//! let args = ["cardroom-sim", "--games", "3", "--server-url", "http://localhost:9999"];
//! let input: &[u8] = b"";
//! let code = cardroom_sim::run(args, input, &mut std::io::stdout(), &mut std::io::stderr()).await;
//! assert_eq!(code, 0);
//! # }
//! ```

use clap::Parser;
use std::io::Write;
use tokio::io::AsyncBufRead;

pub mod client;
pub mod command;
pub mod config;
pub mod driver;
pub mod error;
pub mod exit_code;
pub mod logging;
pub mod prompt;
pub mod ui;

pub use client::GameClient;
pub use command::SimCommand;
pub use config::{Config, ConfigResolved, FlagOverrides, ValueSource};
pub use driver::{async_shuffle, launch, simulate_game, wait_all, GameRun};
pub use error::{ConfigError, SimError};
pub use prompt::{run_prompt, SessionEnd};

#[derive(Debug, Parser)]
#[command(
    name = "cardroom-sim",
    version,
    about = "Simulate concurrent games against a cardroom server"
)]
pub struct SimCli {
    /// Base URL of the server, e.g. http://localhost:9999
    #[arg(long)]
    pub server_url: Option<String>,

    /// Largest number of games one prompt command may launch
    #[arg(long)]
    pub max_games: Option<usize>,

    /// Run this many games without prompting, then exit
    #[arg(long)]
    pub games: Option<usize>,

    #[arg(long, value_enum, default_value_t = logging::LogFormat::Text)]
    pub log_format: logging::LogFormat,
}

impl SimCli {
    fn overrides(&self) -> FlagOverrides {
        FlagOverrides {
            server_url: self.server_url.clone(),
            max_games: self.max_games,
        }
    }
}

/// Parses `args` and runs the simulator. Returns the process exit code.
pub async fn run<I, S, R>(args: I, input: R, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: AsyncBufRead + Unpin,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    match SimCli::try_parse_from(&argv) {
        Ok(cli) => execute(cli, input, out, err).await,
        Err(e) => {
            use clap::error::ErrorKind;

            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = writeln!(err, "{}", e);
                    exit_code::ERROR
                }
            }
        }
    }
}

/// Runs an already-parsed command line.
pub async fn execute<R>(cli: SimCli, input: R, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    R: AsyncBufRead + Unpin,
{
    let resolved = match config::load_with_sources(&cli.overrides()) {
        Ok(resolved) => resolved,
        Err(e) => {
            let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
            return exit_code::ERROR;
        }
    };
    let ConfigResolved { config, sources } = resolved;
    tracing::info!(
        server_url = %config.server_url,
        server_url_source = ?sources.server_url,
        max_games = config.max_games,
        max_games_source = ?sources.max_games,
        "simulator configured"
    );

    let client = match GameClient::new(&config.server_url) {
        Ok(client) => client,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            return exit_code::ERROR;
        }
    };

    match cli.games {
        Some(count) => run_scripted(&client, count, config.max_games, err).await,
        None => match run_prompt(input, &client, config.max_games, out).await {
            Ok(end) => {
                tracing::info!(?end, "session ended");
                exit_code::SUCCESS
            }
            Err(e) => {
                let _ = ui::write_error(err, &e.to_string());
                exit_code::ERROR
            }
        },
    }
}

async fn run_scripted(
    client: &GameClient,
    count: usize,
    max_games: usize,
    err: &mut dyn Write,
) -> i32 {
    if count == 0 || count > max_games {
        let _ = ui::write_error(
            err,
            &format!("--games must be between 1 and {max_games} (got {count})"),
        );
        return exit_code::ERROR;
    }

    let results = wait_all(launch(client, count)).await;
    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed == 0 {
        exit_code::SUCCESS
    } else {
        exit_code::ERROR
    }
}
