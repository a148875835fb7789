use crate::errors::ApiError;
use crate::handlers;
use crate::middleware::with_request_logging;
use crate::registry::{GameRegistry, RegistrySettings};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::path::Tail;
use warp::filters::BoxedFilter;
use warp::http::header::{HeaderMap, CONTENT_LENGTH, TRANSFER_ENCODING};
use warp::hyper::body::Bytes;
use warp::reject::Rejection;
use warp::reply::{Reply, Response};
use warp::Filter;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9999;

/// Largest deal form body accepted.
pub const MAX_FORM_BYTES: u64 = 4 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    registry: RegistrySettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            registry: RegistrySettings::default(),
        }
    }

    /// Loopback on an ephemeral port.
    pub fn for_tests() -> Self {
        Self::new(DEFAULT_HOST, 0)
    }

    pub fn with_registry(mut self, registry: RegistrySettings) -> Self {
        self.registry = registry;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn registry(&self) -> RegistrySettings {
        self.registry
    }
}

/// Everything a request handler can reach.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    registry: Arc<GameRegistry>,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Self {
        let registry = Arc::new(GameRegistry::new(config.registry()));
        Self { config, registry }
    }

    pub fn new_for_tests() -> Self {
        Self::new(ServerConfig::for_tests())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> Arc<GameRegistry> {
        Arc::clone(&self.registry)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            context: AppContext::new(config),
        }
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let bind_addr = Self::bind_addr(context.config())?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = with_request_logging(Self::routes(&context));
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(%addr, "cardroom server listening");

        let task = tokio::spawn(server_future);

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(source) = err.source() {
            if let Some(io_err) = source.downcast_ref::<std::io::Error>() {
                let recreated = std::io::Error::new(io_err.kind(), io_err.to_string());
                return ServerError::BindError(recreated);
            }
        }

        ServerError::ConfigError(err.to_string())
    }

    /// The full route table, without request logging.
    pub fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        Self::health_route(context)
            .or(Self::game_routes(context))
            .unify()
            .or(Self::inspection_routes(context))
            .unify()
            .boxed()
    }

    fn health_route(context: &AppContext) -> BoxedFilter<(Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .and(Self::with_registry(context.registry()))
            .map(|registry: Arc<GameRegistry>| handlers::health(&registry).into_response())
            .boxed()
    }

    fn game_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let registry = context.registry();

        let create = warp::path!("newgame")
            .and(warp::get())
            .and(Self::with_registry(registry.clone()))
            .and_then(|registry: Arc<GameRegistry>| async move {
                Ok::<_, Infallible>(handlers::create_game(registry).await)
            });

        let shuffle = warp::path("shuffle")
            .and(warp::post())
            .and(Self::id_segments(1))
            .and(Self::with_registry(registry.clone()))
            .and_then(|ids: Vec<String>, registry: Arc<GameRegistry>| async move {
                let game_id = ids.into_iter().next().unwrap_or_default();
                Ok::<_, Infallible>(handlers::shuffle_game(registry, game_id).await)
            });

        let deal = warp::path("deal")
            .and(warp::post())
            .and(Self::id_segments(2))
            .and(Self::with_registry(registry))
            .and(Self::deal_params())
            .and_then(
                |ids: Vec<String>,
                 registry: Arc<GameRegistry>,
                 params: Result<HashMap<String, String>, ApiError>| async move {
                    let mut ids = ids.into_iter();
                    let game_id = ids.next().unwrap_or_default();
                    let player_id = ids.next().unwrap_or_default();
                    Ok::<_, Infallible>(
                        handlers::deal_cards(registry, game_id, player_id, params).await,
                    )
                },
            );

        create
            .or(shuffle)
            .unify()
            .or(deal)
            .unify()
            .boxed()
    }

    fn inspection_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let registry = context.registry();

        let list = warp::path!("games")
            .and(warp::get())
            .and(Self::with_registry(registry.clone()))
            .and_then(|registry: Arc<GameRegistry>| async move {
                Ok::<_, Infallible>(handlers::list_games(registry).await)
            });

        let by_id = warp::path!("games" / String)
            .and(warp::get())
            .and(Self::with_registry(registry))
            .and_then(|game_id: String, registry: Arc<GameRegistry>| async move {
                Ok::<_, Infallible>(handlers::get_game(registry, game_id).await)
            });

        list.or(by_id).unify().boxed()
    }

    /// The rest of the path as percent-decoded ids. Segments that are
    /// absent or blank come through as empty strings so the handler can
    /// answer 400; more than `max` segments is not one of our routes.
    fn id_segments(
        max: usize,
    ) -> impl Filter<Extract = (Vec<String>,), Error = Rejection> + Clone {
        warp::path::tail().and_then(move |tail: Tail| async move {
            let ids = handlers::path_ids(tail.as_str());
            if ids.len() > max {
                Err(warp::reject::not_found())
            } else {
                Ok(ids)
            }
        })
    }

    /// `numToDeal` may arrive in the query string or a urlencoded form; the
    /// form wins when both are present. Bodies are capped at
    /// [`MAX_FORM_BYTES`]; a request with no length and no transfer encoding
    /// has no body.
    fn deal_params(
    ) -> impl Filter<Extract = (Result<HashMap<String, String>, ApiError>,), Error = Rejection> + Clone
    {
        let query = warp::query::raw()
            .or(warp::any().map(String::new))
            .unify();

        let sized_body = warp::body::content_length_limit(MAX_FORM_BYTES).and(warp::body::bytes());
        let no_body = warp::header::headers_cloned().and_then(|headers: HeaderMap| async move {
            if headers.contains_key(CONTENT_LENGTH) || headers.contains_key(TRANSFER_ENCODING) {
                Err(warp::reject::not_found())
            } else {
                Ok(Bytes::new())
            }
        });

        query
            .and(warp::header::optional::<String>("content-type"))
            .and(sized_body.or(no_body).unify())
            .map(|query: String, content_type: Option<String>, body: Bytes| {
                handlers::parse_deal_params(&query, content_type.as_deref(), &body)
            })
    }

    fn with_registry(
        registry: Arc<GameRegistry>,
    ) -> impl Filter<Extract = (Arc<GameRegistry>,), Error = Infallible> + Clone {
        warp::any().map(move || Arc::clone(&registry))
    }
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<()>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for clients, e.g. `http://127.0.0.1:9999`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.await.map_err(|err| {
                ServerError::ConfigError(format!("server task join error: {err}"))
            })?;
        }

        tracing::info!(addr = %self.addr, "cardroom server stopped");
        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_accepts_ip_and_port() {
        let addr = WebServer::bind_addr(&ServerConfig::new("127.0.0.1", 9999)).unwrap();
        assert_eq!(addr, "127.0.0.1:9999".parse().unwrap());
    }

    #[test]
    fn bind_addr_resolves_localhost() {
        let addr = WebServer::bind_addr(&ServerConfig::new("localhost", 0)).unwrap();
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn default_config_matches_reference_port() {
        let config = ServerConfig::default();
        assert_eq!(config.host(), DEFAULT_HOST);
        assert_eq!(config.port(), DEFAULT_PORT);
    }

    #[tokio::test]
    async fn start_and_shutdown_on_ephemeral_port() {
        let handle = WebServer::new(ServerConfig::for_tests())
            .start()
            .await
            .expect("start");
        assert_ne!(handle.address().port(), 0);
        assert!(handle.base_url().starts_with("http://127.0.0.1:"));
        handle.shutdown().await.expect("shutdown");
    }
}
