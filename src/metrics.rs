use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, register_counter, register_gauge};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("site_requests_total", "Total number of rate limited endpoint requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("site_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref RATE_LIMIT_KEYS: Gauge =
        register_gauge!("site_rate_limit_keys", "Current number of tracked rate limit keys").unwrap();
    pub static ref RATE_LIMIT_SWEPT: Counter =
        register_counter!("site_rate_limit_swept_total", "Expired rate limit records removed by the sweeper").unwrap();
}
