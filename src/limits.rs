//! Per-IP rate limiting
//!
//! Fixed-window counters keyed by client IP. Two limiters run side by
//! side: a general one covering every request and a stricter one applied
//! on top for write operations. Exceeding either yields HTTP 429 with
//! standard RateLimit-* headers.

use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of a rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request allowed; remaining budget in the current window
    Allow { remaining: u32 },
    /// Request rejected; seconds until the window resets
    Deny { retry_after_secs: u64 },
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window per-IP request counter
pub struct RateLimiter {
    windows: DashMap<IpAddr, Window>,
    window: Duration,
    max: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, max: u32) -> Self {
        Self {
            windows: DashMap::new(),
            window,
            max,
        }
    }

    /// Maximum requests per window, for the RateLimit-Limit header
    pub fn limit(&self) -> u32 {
        self.max
    }

    /// Count one request from `ip` and decide whether to allow it
    pub fn check(&self, ip: IpAddr) -> Decision {
        let now = Instant::now();
        let mut entry = self.windows.entry(ip).or_insert_with(|| Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.max {
            let elapsed = now.duration_since(entry.started);
            let retry_after = self.window.saturating_sub(elapsed);
            return Decision::Deny {
                retry_after_secs: retry_after.as_secs().max(1),
            };
        }

        entry.count += 1;
        Decision::Allow {
            remaining: self.max - entry.count,
        }
    }

    /// Drop windows that expired at least one full window ago
    pub fn cleanup(&self) -> usize {
        let before = self.windows.len();
        let cutoff = self.window * 2;
        self.windows
            .retain(|_, w| w.started.elapsed() < cutoff);
        before.saturating_sub(self.windows.len())
    }
}

/// Spawn a background task that periodically drops expired windows
pub fn spawn_cleanup_task(limiters: Vec<Arc<RateLimiter>>) {
    tokio::spawn(async move {
        let interval = Duration::from_secs(60);
        loop {
            tokio::time::sleep(interval).await;
            for limiter in &limiters {
                let removed = limiter.cleanup();
                if removed > 0 {
                    debug!("Rate limit cleanup: removed {} expired windows", removed);
                }
            }
        }
    });
    info!("Rate limit cleanup task started");
}
