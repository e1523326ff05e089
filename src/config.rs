//! Configuration for Folio
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;

/// Folio - personal-portfolio data service
#[derive(Parser, Debug, Clone)]
#[command(name = "folio")]
#[command(about = "Single-document portfolio profile API with a skill query engine")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:3001")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "folio")]
    pub mongodb_db: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Deployment environment label reported by /health
    #[arg(long, env = "ENVIRONMENT", default_value = "development")]
    pub environment: String,

    /// Maximum accepted request body size in bytes
    #[arg(long, env = "MAX_BODY_BYTES", default_value = "10485760")]
    pub max_body_bytes: usize,

    /// Rate limit window in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value = "900")]
    pub rate_limit_window_secs: u64,

    /// Maximum requests per IP per window (all endpoints)
    #[arg(long, env = "RATE_LIMIT_MAX", default_value = "100")]
    pub rate_limit_max: u32,

    /// Maximum write requests per IP per window (POST/PUT/DELETE)
    #[arg(long, env = "RATE_LIMIT_WRITE_MAX", default_value = "20")]
    pub rate_limit_write_max: u32,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.mongodb_uri.is_empty() {
            return Err("MONGODB_URI must not be empty".to_string());
        }

        if self.rate_limit_window_secs == 0 {
            return Err("RATE_LIMIT_WINDOW_SECS must be greater than zero".to_string());
        }

        if self.rate_limit_write_max > self.rate_limit_max {
            return Err(
                "RATE_LIMIT_WRITE_MAX must not exceed RATE_LIMIT_MAX".to_string()
            );
        }

        Ok(())
    }
}
