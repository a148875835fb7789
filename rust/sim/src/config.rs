use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_PATH_ENV: &str = "CARDROOM_SIM_CONFIG";
pub const SERVER_URL_ENV: &str = "CARDROOM_SERVER_URL";
pub const MAX_GAMES_ENV: &str = "CARDROOM_MAX_GAMES";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:9999";
pub const DEFAULT_MAX_GAMES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub server_url: String,
    /// Largest batch the prompt will launch at once.
    pub max_games: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            max_games: DEFAULT_MAX_GAMES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub server_url: ValueSource,
    pub max_games: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            server_url: ValueSource::Default,
            max_games: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; they beat every other layer.
#[derive(Debug, Clone, Default)]
pub struct FlagOverrides {
    pub server_url: Option<String>,
    pub max_games: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    server_url: Option<String>,
    #[serde(default)]
    max_games: Option<usize>,
}

/// Resolves defaults, then the TOML file named by `CARDROOM_SIM_CONFIG`,
/// then environment variables, then `flags`.
pub fn load_with_sources(flags: &FlagOverrides) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = non_empty_env(CONFIG_PATH_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.server_url {
            cfg.server_url = v;
            sources.server_url = ValueSource::File;
        }
        if let Some(v) = f.max_games {
            cfg.max_games = v;
            sources.max_games = ValueSource::File;
        }
    }

    if let Some(url) = non_empty_env(SERVER_URL_ENV) {
        cfg.server_url = url;
        sources.server_url = ValueSource::Env;
    }
    if let Some(max) = non_empty_env(MAX_GAMES_ENV) {
        cfg.max_games = max
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {MAX_GAMES_ENV}: {max}")))?;
        sources.max_games = ValueSource::Env;
    }

    if let Some(url) = &flags.server_url {
        cfg.server_url = url.clone();
        sources.server_url = ValueSource::Flag;
    }
    if let Some(max) = flags.max_games {
        cfg.max_games = max;
        sources.max_games = ValueSource::Flag;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.max_games == 0 {
        return Err(ConfigError::Invalid("max_games must be >=1".into()));
    }
    if !(cfg.server_url.starts_with("http://") || cfg.server_url.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "server_url must start with http:// or https:// (got `{}`)",
            cfg.server_url
        )));
    }
    Ok(())
}
