//! HTTP routes for Folio

pub mod health;
pub mod profile;
pub mod query;

pub use health::health_check;
pub use profile::{
    handle_create_profile, handle_delete_profile, handle_get_profile, handle_update_profile,
};
pub use query::{handle_filter_projects, handle_search, handle_top_skills};

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::collections::HashMap;

use crate::types::FolioError;

/// Build a successful JSON response
pub(crate) fn json_response<T: Serialize>(status: StatusCode, data: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(data)
        .unwrap_or_else(|_| br#"{"error":"Internal server error"}"#.to_vec());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| {
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Full::new(Bytes::from(r#"{"error":"Internal server error"}"#)))
                .unwrap()
        })
}

/// Build a JSON error response
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message });
    json_response(status, &body)
}

/// Map a storage/query error to its HTTP response.
///
/// Internal failures are surfaced generically; the detail stays in logs.
pub(crate) fn folio_error_response(err: &FolioError) -> Response<Full<Bytes>> {
    match err {
        FolioError::MissingParameter(name) => error_response(
            StatusCode::BAD_REQUEST,
            &format!("{} parameter is required", name),
        ),
        FolioError::ProfileNotFound => {
            error_response(StatusCode::NOT_FOUND, "Profile not found")
        }
        FolioError::ProfileExists => error_response(
            StatusCode::CONFLICT,
            "Profile already exists. Use PUT to update.",
        ),
        FolioError::Validation(detail) => error_response(StatusCode::BAD_REQUEST, detail),
        FolioError::Database(_) | FolioError::Io(_) => {
            tracing::error!("Internal error: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Parse a query string into a key-value map, percent-decoding values
pub(crate) fn parse_query_params(query: &str) -> HashMap<String, String> {
    if query.is_empty() {
        return HashMap::new();
    }

    query
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("").replace('+', " ");
            let decoded = urlencoding::decode(&value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.clone());
            Some((key.to_string(), decoded))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_params_decodes_values() {
        let params = parse_query_params("q=web%20apps&limit=5");
        assert_eq!(params.get("q").map(String::as_str), Some("web apps"));
        assert_eq!(params.get("limit").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_parse_query_params_plus_as_space() {
        let params = parse_query_params("q=chat+server");
        assert_eq!(params.get("q").map(String::as_str), Some("chat server"));
    }

    #[test]
    fn test_parse_query_params_empty() {
        assert!(parse_query_params("").is_empty());
    }

    #[test]
    fn test_missing_parameter_maps_to_400() {
        let response = folio_error_response(&FolioError::MissingParameter("Skill"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_stay_generic() {
        let response =
            folio_error_response(&FolioError::Database("connection refused".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
