//! Profile CRUD routes
//!
//! The profile is a singleton: POST creates it once, PUT replaces it in
//! place, DELETE removes it wholesale. Reads always fetch the whole
//! document.

use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use std::sync::Arc;
use tracing::warn;

use crate::db::schemas::ProfileDoc;
use crate::routes::{error_response, folio_error_response, json_response};
use crate::server::AppState;

/// Handle GET /api/profile
pub async fn handle_get_profile(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match state.store.fetch().await {
        Ok(Some(profile)) => json_response(StatusCode::OK, &profile),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Profile not found"),
        Err(e) => folio_error_response(&e),
    }
}

/// Handle POST /api/profile
pub async fn handle_create_profile(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let profile = match read_profile_body(req, state.args.max_body_bytes).await {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state.store.create(profile).await {
        Ok(created) => json_response(StatusCode::CREATED, &created),
        Err(e) => folio_error_response(&e),
    }
}

/// Handle PUT /api/profile
pub async fn handle_update_profile(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let profile = match read_profile_body(req, state.args.max_body_bytes).await {
        Ok(p) => p,
        Err(response) => return response,
    };

    match state.store.replace(profile).await {
        Ok(updated) => json_response(StatusCode::OK, &updated),
        Err(e) => folio_error_response(&e),
    }
}

/// Handle DELETE /api/profile
pub async fn handle_delete_profile(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match state.store.delete().await {
        Ok(()) => json_response(
            StatusCode::OK,
            &serde_json::json!({ "message": "Profile deleted successfully" }),
        ),
        Err(e) => folio_error_response(&e),
    }
}

/// Read and deserialize a profile body, enforcing the size cap.
///
/// Incoming documents never carry storage identity; any client-supplied
/// _id or metadata is discarded.
async fn read_profile_body(
    req: Request<Incoming>,
    max_bytes: usize,
) -> Result<ProfileDoc, Response<Full<Bytes>>> {
    let body = match Limited::new(req.into_body(), max_bytes).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<http_body_util::LengthLimitError>() => {
            return Err(error_response(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large",
            ));
        }
        Err(e) => {
            warn!("Profile body read error: {}", e);
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ));
        }
    };

    let mut profile: ProfileDoc = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!("Profile JSON parse error: {}", e);
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid JSON: {}", e),
            ));
        }
    };

    profile._id = None;
    profile.metadata = Default::default();

    Ok(profile)
}
