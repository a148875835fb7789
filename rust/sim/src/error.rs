//! Error types for the simulation driver.
//!
//! [`SimError`] covers a single simulated game and the prompt loop. A game
//! that fails ends only its own task; the others keep running.
//! [`ConfigError`] is raised while layering configuration and stops the
//! process before any game starts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// The request never produced a response (connect, reset, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Neither the `x-game-id` header nor the response body named a game.
    #[error("server did not return a game id")]
    MissingGameId,

    /// The shuffle task dropped its sender without reporting.
    #[error("shuffle task ended without a result")]
    ChannelClosed,

    #[error("simulation task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_the_url() {
        let err = SimError::Status {
            url: "http://localhost:9999/shuffle/abc/".into(),
            status: 404,
            body: "{\"error\":\"game_not_found\"}".into(),
        };
        assert_eq!(
            err.to_string(),
            "http://localhost:9999/shuffle/abc/ returned 404: {\"error\":\"game_not_found\"}"
        );
    }

    #[test]
    fn config_invalid_message_is_passed_through() {
        let err = ConfigError::Invalid("max_games must be >= 1".into());
        assert_eq!(err.to_string(), "max_games must be >= 1");
    }
}
