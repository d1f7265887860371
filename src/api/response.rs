// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::error::{ApiGetError, ErrorBody};
use crate::handler::{ApiResponse, NOT_FOUND_MESSAGE};

/// Build JSON response
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response");
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"message":"Internal server error","code":99,"name":"ApiEditError"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to build response");
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Convert a handler response into HTTP
pub fn from_api_response(response: ApiResponse) -> Response<Full<Bytes>> {
    let (code, body) = response.into_parts();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, &body)
}

/// Translate a handler error into HTTP
pub fn error_response(err: &ApiGetError) -> Response<Full<Bytes>> {
    let status = match err {
        ApiGetError::InvalidRequestData(_) | ApiGetError::InvalidEntity(_) => {
            StatusCode::BAD_REQUEST
        }
        ApiGetError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_response(status, &ErrorBody::from(err))
}

/// 404 Not Found response
pub fn not_found() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({ "message": NOT_FOUND_MESSAGE }),
    )
}

/// 405 Method Not Allowed response
pub fn method_not_allowed() -> Response<Full<Bytes>> {
    let mut response = json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &serde_json::json!({ "message": "common.message.methodNotAllowed" }),
    );
    response
        .headers_mut()
        .insert(hyper::header::ALLOW, hyper::header::HeaderValue::from_static("GET"));
    response
}

/// Health check response
pub fn health() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
}
