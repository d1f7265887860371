// Connection handling module
// Accepts a single TCP connection and serves it over HTTP/1.1

use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api;
use crate::config::AppState;
use crate::logger::{self, AccessLogEntry};

/// Accept a connection unless `max_connections` is reached.
///
/// Returns `false` when the connection was rejected.
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) -> bool {
    // Increment first, then check, so concurrent accepts cannot both slip under the limit
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(
                %peer_addr,
                active = prev_count,
                max = max_conn,
                "max connections reached, connection rejected"
            );
            drop(stream);
            return false;
        }
    }

    tracing::trace!(%peer_addr, "connection accepted");
    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
    true
}

/// Serve one connection in its own task.
///
/// The whole connection is bounded by `max(read_timeout, write_timeout)`.
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let timeout_duration = Duration::from_secs(std::cmp::max(
            performance.read_timeout,
            performance.write_timeout,
        ));

        let mut builder = http1::Builder::new();
        builder.keep_alive(performance.keep_alive_enabled());

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| serve_request(req, peer_addr, Arc::clone(&service_state))),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::debug!(%peer_addr, error = %err, "connection error"),
            Err(_) => tracing::debug!(
                %peer_addr,
                timeout_secs = timeout_duration.as_secs(),
                "connection timed out"
            ),
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

async fn serve_request(
    req: Request<Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<hyper::Response<http_body_util::Full<hyper::body::Bytes>>, std::convert::Infallible> {
    let started = Instant::now();
    let entry = start_access_entry(&state, &req, peer_addr);

    let response = api::handle_request(req, Arc::clone(&state)).await?;

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.elapsed = started.elapsed();
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Begin an access log line, or `None` when `logging.access_log` is off
fn start_access_entry<B>(
    state: &AppState,
    req: &Request<B>,
    peer_addr: SocketAddr,
) -> Option<AccessLogEntry> {
    state
        .config
        .logging
        .access_log
        .then(|| access_entry(req, peer_addr))
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: hyper::header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().as_str(),
        req.uri().path(),
    );
    entry.query = req.uri().query().map(str::to_string);
    entry.http_version = http_version(req.version()).to_string();
    entry.referer = header(hyper::header::REFERER);
    entry.user_agent = header(hyper::header::USER_AGENT);
    entry
}

fn http_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::registry::EntityRegistry;
    use std::collections::HashMap;

    fn state_with_access_log(enabled: bool) -> AppState {
        let mut config = Config::load_from("record_api_config_that_does_not_exist").unwrap();
        config.logging.access_log = enabled;
        AppState::with_parts(config, EntityRegistry::new(), HashMap::new())
    }

    #[test]
    fn test_access_log_follows_config() {
        let req = Request::builder().uri("/api/product/10").body(()).unwrap();
        let peer: SocketAddr = "127.0.0.1:40000".parse().unwrap();

        let entry = start_access_entry(&state_with_access_log(true), &req, peer).unwrap();
        assert_eq!(entry.path, "/api/product/10");

        assert!(start_access_entry(&state_with_access_log(false), &req, peer).is_none());
    }

    #[test]
    fn test_access_entry_from_request() {
        let req = Request::builder()
            .method("GET")
            .uri("/api/product/10?lang=en")
            .header("User-Agent", "curl/8.0")
            .body(())
            .unwrap();
        let entry = access_entry(&req, "10.0.0.5:51000".parse().unwrap());

        assert_eq!(entry.remote_addr, "10.0.0.5");
        assert_eq!(entry.method, "GET");
        assert_eq!(entry.path, "/api/product/10");
        assert_eq!(entry.query.as_deref(), Some("lang=en"));
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(entry.referer, None);
        assert_eq!(entry.http_version, "1.1");
    }
}
