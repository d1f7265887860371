// Get-by-id HTTP handler
// Runs the request handler and translates its outcome into HTTP

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::sync::Arc;

use super::response::{error_response, from_api_response};
use crate::config::AppState;
use crate::error::ApiGetError;
use crate::handler::GetData;

/// `GET {base_path}/{entity}/{id}[/...]`
pub async fn handle_get_data(
    state: Arc<AppState>,
    entity: &str,
    segments: &[&str],
) -> Response<Full<Bytes>> {
    let mut request = GetData::from_segments(entity, segments.iter().copied());
    if let Some(format) = state.formatter(entity) {
        request = request.with_format(format);
    }

    let validated = match request.validate(&state.registry) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(%entity, code = e.code().as_u16(), error = %e, "rejected request");
            return error_response(&e);
        }
    };

    match validated.process().await {
        Ok(response) => from_api_response(response),
        Err(e) => {
            tracing::error!(%entity, error = %e, "record lookup failed");
            error_response(&ApiGetError::internal(e.to_string()))
        }
    }
}
