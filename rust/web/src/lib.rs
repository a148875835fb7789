//! HTTP front end for the cardroom: a process-wide game registry behind a
//! small warp route table (`/newgame/`, `/shuffle/{game}/`,
//! `/deal/{game}/{player}/`).

pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod registry;
pub mod server;

pub use errors::{ApiError, ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use handlers::{DealResponse, GameListResponse, ShuffleResponse, ShuffledState, GAME_ID_HEADER};
pub use logging::{init_logging, LogEntry, LogFormat, TestLogSubscriber};
pub use middleware::{log_response, with_request_logging};
pub use registry::{GameRegistry, RegistryError, RegistrySettings};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_shares_one_registry() {
        let ctx = AppContext::new_for_tests();
        let id = ctx.registry().create().expect("create");

        let clone = ctx.clone();
        assert_eq!(clone.registry().active_games(), vec![id]);
    }
}
