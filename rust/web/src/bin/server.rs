//! Standalone cardroom server
//!
//! Usage: cargo run -p cardroom_web --bin cardroom-server -- --port 9999

use cardroom_engine::{PlayerCountPolicy, ShuffleStrategy, DEFAULT_MAX_DRAWS};
use cardroom_web::logging::LogFormat;
use cardroom_web::server::{DEFAULT_HOST, DEFAULT_PORT};
use cardroom_web::{init_logging, RegistrySettings, ServerConfig, WebServer};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShuffleArg {
    FisherYates,
    Rejection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerCountArg {
    Uniform,
    ZeroFloor,
}

#[derive(Debug, Parser)]
#[command(name = "cardroom-server", version, about = "In-memory card game server")]
struct Args {
    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind to
    #[arg(long, short = 'p', default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Shuffle used for new games and reshuffles
    #[arg(long, value_enum, default_value_t = ShuffleArg::FisherYates)]
    shuffle: ShuffleArg,

    /// Draw cap for the rejection shuffle
    #[arg(long, default_value_t = DEFAULT_MAX_DRAWS)]
    max_draws: usize,

    /// How many players a new game seats
    #[arg(long, value_enum, default_value_t = PlayerCountArg::Uniform)]
    player_count: PlayerCountArg,

    /// Seed every game deterministically (game n uses seed + n)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn registry_settings(&self) -> RegistrySettings {
        let strategy = match self.shuffle {
            ShuffleArg::FisherYates => ShuffleStrategy::FisherYates,
            ShuffleArg::Rejection => ShuffleStrategy::RejectionSampling {
                max_draws: self.max_draws,
            },
        };
        let player_policy = match self.player_count {
            PlayerCountArg::Uniform => PlayerCountPolicy::Uniform,
            PlayerCountArg::ZeroFloor => PlayerCountPolicy::ZeroFloor,
        };

        RegistrySettings {
            strategy,
            player_policy,
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_format);

    let settings = args.registry_settings();
    let config = ServerConfig::new(args.host.clone(), args.port).with_registry(settings);

    tracing::info!(
        host = %config.host(),
        port = config.port(),
        strategy = ?settings.strategy,
        player_policy = ?settings.player_policy,
        seeded = settings.seed.is_some(),
        "starting cardroom server"
    );

    let handle = WebServer::new(config).start().await?;
    println!("Server running at {}", handle.base_url());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    handle.shutdown().await?;

    Ok(())
}
