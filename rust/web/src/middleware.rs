use std::time::Instant;
use warp::http::{Method, StatusCode};
use warp::reject::Rejection;
use warp::reply::Response;
use warp::Filter;

/// Wraps `filter` so every request logs its method, path, status and latency.
pub fn with_request_logging<F>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (Response,), Error = Rejection> + Clone + Send + Sync + 'static,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: warp::path::FullPath, method: Method| {
            tracing::debug!(path = %path.as_str(), method = %method, "incoming request");
            (path, method, Instant::now())
        })
        .and(filter)
        .map(
            |(path, method, start): (warp::path::FullPath, Method, Instant), response: Response| {
                log_response(
                    response.status(),
                    path.as_str(),
                    method.as_str(),
                    start.elapsed().as_millis(),
                );
                response
            },
        )
}

/// Log response with status code
pub fn log_response(status: StatusCode, path: &str, method: &str, duration_ms: u128) {
    if status.is_client_error() {
        tracing::warn!(
            status = status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "client error"
        );
    } else if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "server error"
        );
    } else {
        tracing::info!(
            status = status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "response sent"
        );
    }
}
