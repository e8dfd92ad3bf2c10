//! Fixed-window, in-memory rate limiting keyed by client identifier.
//!
//! Each key gets a window of `window` length that starts on its first
//! attempt. Up to `max_attempts` attempts are allowed inside the window; once
//! the window has elapsed the next attempt opens a fresh one. Stale records
//! are replaced lazily on access and removed in bulk by [`RateLimiter::sweep`].

use axum::http::HeaderMap;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// 15 minutes.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Shared bucket for callers with no identifying header. Every such caller
/// counts against the same window, so one noisy anonymous client can throttle
/// unrelated ones.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Client address headers, in the order they are consulted. These are set by
/// reverse proxies and are trivially spoofable when the service is exposed
/// directly; no format validation is done on their values.
pub const CLIENT_IP_HEADERS: [&str; 4] = [
    "x-forwarded-for",
    "x-real-ip",
    "x-client-ip",
    "cf-connecting-ip",
];

// Rate limit entry - tracks attempts per IP/key inside the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_time: u64, // epoch ms
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_time: u64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets, rounded up and never zero.
    pub fn retry_after_secs(&self, now_ms: u64) -> u64 {
        self.reset_time.saturating_sub(now_ms).div_ceil(1000).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_attempts: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Case-insensitive header access. Anything that can answer "what is the
/// value of header X" can be rate limited by client address.
pub trait HeaderLookup {
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }
}

/// What to rate limit on.
pub enum Identifier<'a> {
    /// Used verbatim as the key.
    Key(&'a str),
    /// Key is derived from client address headers, see [`client_key`].
    Request(&'a dyn HeaderLookup),
}

impl<'a> Identifier<'a> {
    fn into_key(self) -> String {
        match self {
            Identifier::Key(key) => key.to_string(),
            Identifier::Request(headers) => client_key(headers),
        }
    }
}

impl<'a> From<&'a str> for Identifier<'a> {
    fn from(key: &'a str) -> Self {
        Identifier::Key(key)
    }
}

impl<'a> From<&'a String> for Identifier<'a> {
    fn from(key: &'a String) -> Self {
        Identifier::Key(key.as_str())
    }
}

impl<'a> From<&'a HeaderMap> for Identifier<'a> {
    fn from(headers: &'a HeaderMap) -> Self {
        Identifier::Request(headers)
    }
}

/// Derive a client key from proxy headers.
///
/// Takes the first non-empty of `x-forwarded-for` (first hop only),
/// `x-real-ip`, `x-client-ip` and `cf-connecting-ip`, falling back to
/// [`UNKNOWN_CLIENT`].
pub fn client_key(headers: &dyn HeaderLookup) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .filter_map(|name| {
            let value = headers.header(name)?;
            let value = if *name == "x-forwarded-for" {
                // "client, proxy1, proxy2"
                value.split(',').next().unwrap_or_default()
            } else {
                value
            };
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .next()
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    max_attempts: u32,
    window_ms: u64,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            max_attempts: config.max_attempts.max(1),
            window_ms: u64::try_from(config.window.as_millis()).unwrap_or(u64::MAX),
            clock,
        }
    }

    /// Record an attempt for `identifier` and report whether it is allowed.
    ///
    /// The lookup, window check and increment for a key all happen under
    /// that key's map entry lock, so concurrent checks on one key are
    /// serialized. Denied attempts leave the record untouched.
    pub fn check<'a>(&self, identifier: impl Into<Identifier<'a>>) -> RateLimitResult {
        let key = identifier.into().into_key();
        let now = self.clock.now_ms();

        let mut entry = self.entries.entry(key).or_insert(RateLimitEntry {
            count: 0,
            reset_time: 0,
        });

        // new key, or window expired..? start a fresh one
        if entry.count == 0 || now > entry.reset_time {
            entry.count = 1;
            entry.reset_time = now.saturating_add(self.window_ms);
            return RateLimitResult {
                allowed: true,
                remaining: self.max_attempts - 1,
                reset_time: entry.reset_time,
            };
        }

        if entry.count >= self.max_attempts {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_time: entry.reset_time,
            };
        }

        entry.count += 1;
        RateLimitResult {
            allowed: true,
            remaining: self.max_attempts - entry.count,
            reset_time: entry.reset_time,
        }
    }

    /// Drop every record whose window has ended. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let current = now <= entry.reset_time;
            if !current {
                removed += 1;
            }
            current
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_attempts: self.max_attempts,
            window: Duration::from_millis(self.window_ms),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
