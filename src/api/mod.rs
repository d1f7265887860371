// API module entry
// Routes `{base_path}/{entity}/{id}` lookups and the health probe

mod handlers;
mod response;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::{AppState, Config};
use crate::logger;

// Re-export public types
pub use response::*;

/// Where a request path leads
#[derive(Debug, PartialEq, Eq)]
pub enum ApiRoute<'a> {
    Health,
    GetData {
        entity: &'a str,
        segments: Vec<&'a str>,
    },
    NotFound,
}

/// Resolve a request path against the configured base path
pub fn resolve_route<'a>(path: &'a str, config: &Config) -> ApiRoute<'a> {
    if config.health.enabled && path == config.health.path {
        return ApiRoute::Health;
    }

    let base = config.api.base_path.trim_end_matches('/');
    let Some(rest) = path.strip_prefix(base) else {
        return ApiRoute::NotFound;
    };
    // "/apix/..." must not match base "/api"
    let Some(rest) = rest.strip_prefix('/') else {
        return ApiRoute::NotFound;
    };

    let mut parts = rest.split('/').filter(|s| !s.is_empty());
    match parts.next() {
        Some(entity) => ApiRoute::GetData {
            entity,
            segments: parts.collect(),
        },
        None => ApiRoute::NotFound,
    }
}

/// API route handler
///
/// Dispatches to handler functions based on request path and method
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    // The body is never read; keep only what routing needs
    let path = req.uri().path().to_owned();
    let method = req.method().clone();
    drop(req);

    let response = match resolve_route(&path, &state.config) {
        ApiRoute::Health if method == Method::GET => health(),
        ApiRoute::GetData { entity, segments } if method == Method::GET => {
            handlers::handle_get_data(Arc::clone(&state), entity, &segments).await
        }
        ApiRoute::Health | ApiRoute::GetData { .. } => method_not_allowed(),
        ApiRoute::NotFound => not_found(),
    };

    logger::log_api_request(method.as_str(), &path, response.status().as_u16());
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::load_from("record_api_config_that_does_not_exist").unwrap()
    }

    #[test]
    fn test_resolve_get_data() {
        let cfg = config();
        assert_eq!(
            resolve_route("/api/product/10", &cfg),
            ApiRoute::GetData {
                entity: "product",
                segments: vec!["10"],
            }
        );
        assert_eq!(
            resolve_route("/api/product/10/extra/", &cfg),
            ApiRoute::GetData {
                entity: "product",
                segments: vec!["10", "extra"],
            }
        );
    }

    #[test]
    fn test_resolve_missing_id() {
        let cfg = config();
        assert_eq!(
            resolve_route("/api/product", &cfg),
            ApiRoute::GetData {
                entity: "product",
                segments: vec![],
            }
        );
        assert_eq!(
            resolve_route("/api/product/", &cfg),
            ApiRoute::GetData {
                entity: "product",
                segments: vec![],
            }
        );
    }

    #[test]
    fn test_resolve_outside_base_path() {
        let cfg = config();
        assert_eq!(resolve_route("/api", &cfg), ApiRoute::NotFound);
        assert_eq!(resolve_route("/api/", &cfg), ApiRoute::NotFound);
        assert_eq!(resolve_route("/apix/product/1", &cfg), ApiRoute::NotFound);
        assert_eq!(resolve_route("/", &cfg), ApiRoute::NotFound);
    }

    #[test]
    fn test_resolve_health() {
        let mut cfg = config();
        assert_eq!(resolve_route("/healthz", &cfg), ApiRoute::Health);

        cfg.health.enabled = false;
        assert_eq!(resolve_route("/healthz", &cfg), ApiRoute::NotFound);
    }

    #[test]
    fn test_resolve_base_path_trailing_slash() {
        let mut cfg = config();
        cfg.api.base_path = "/v1/records/".to_string();
        assert_eq!(
            resolve_route("/v1/records/order/A-7", &cfg),
            ApiRoute::GetData {
                entity: "order",
                segments: vec!["A-7"],
            }
        );
    }
}
