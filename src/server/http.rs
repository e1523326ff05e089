//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. One tokio task per
//! connection; every request is stateless and re-fetches the profile, so
//! the only shared mutable state is the rate limiter.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Args;
use crate::db::ProfileStore;
use crate::limits::{self, Decision, RateLimiter};
use crate::routes;
use crate::types::FolioError;

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Singleton profile store
    pub store: ProfileStore,
    /// General limiter covering every request
    pub general_limiter: Arc<RateLimiter>,
    /// Stricter limiter applied on top for write operations
    pub write_limiter: Arc<RateLimiter>,
    /// Process start, for /health uptime
    pub started: Instant,
}

impl AppState {
    /// Create application state with limiters sized from config
    pub fn new(args: Args, store: ProfileStore) -> Self {
        let window = Duration::from_secs(args.rate_limit_window_secs);
        let general_limiter = Arc::new(RateLimiter::new(window, args.rate_limit_max));
        let write_limiter = Arc::new(RateLimiter::new(window, args.rate_limit_write_max));

        Self {
            args,
            store,
            general_limiter,
            write_limiter,
            started: Instant::now(),
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), FolioError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("Folio listening on {}", state.args.listen);

    // Start rate limit window cleanup task
    limits::spawn_cleanup_task(vec![
        Arc::clone(&state.general_limiter),
        Arc::clone(&state.write_limiter),
    ]);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    // General rate limit applies to everything
    if let Decision::Deny { retry_after_secs } = state.general_limiter.check(addr.ip()) {
        return Ok(rate_limited_response(
            "Too many requests from this IP, please try again later.",
            retry_after_secs,
            state.general_limiter.limit(),
        ));
    }

    // Writes get the stricter limiter on top
    let is_write = matches!(method, Method::POST | Method::PUT | Method::DELETE);
    if is_write {
        if let Decision::Deny { retry_after_secs } = state.write_limiter.check(addr.ip()) {
            return Ok(rate_limited_response(
                "Too many write requests from this IP, please try again later.",
                retry_after_secs,
                state.write_limiter.limit(),
            ));
        }
    }

    let query = req.uri().query().map(|q| q.to_string());

    let response = match (method, path.as_str()) {
        // Health check
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state)).await
        }

        // CORS preflight
        (Method::OPTIONS, _) => preflight_response(),

        // Profile CRUD
        (Method::GET, "/api/profile") => routes::handle_get_profile(Arc::clone(&state)).await,
        (Method::POST, "/api/profile") => {
            routes::handle_create_profile(req, Arc::clone(&state)).await
        }
        (Method::PUT, "/api/profile") => {
            routes::handle_update_profile(req, Arc::clone(&state)).await
        }
        (Method::DELETE, "/api/profile") => {
            routes::handle_delete_profile(Arc::clone(&state)).await
        }

        // Query engine
        (Method::GET, "/api/projects") => {
            routes::handle_filter_projects(Arc::clone(&state), query.as_deref()).await
        }
        (Method::GET, "/api/skills/top") => {
            routes::handle_top_skills(Arc::clone(&state), query.as_deref()).await
        }
        (Method::GET, "/api/search") => {
            routes::handle_search(Arc::clone(&state), query.as_deref()).await
        }

        // Not found
        _ => not_found_response(),
    };

    Ok(response)
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Not found response
fn not_found_response() -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": "Endpoint not found" });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

/// Rate limited response with standard headers
fn rate_limited_response(message: &str, retry_after_secs: u64, limit: u32) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": message,
        "retryAfter": retry_after_secs,
    });

    Response::builder()
        .status(StatusCode::TOO_MANY_REQUESTS)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Retry-After", retry_after_secs.to_string())
        .header("RateLimit-Limit", limit.to_string())
        .header("RateLimit-Remaining", "0")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
