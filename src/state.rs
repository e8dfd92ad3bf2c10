use std::sync::Arc;
use crate::brand::Brand;
use crate::rate_limit::RateLimiter;
// app's shared state, built once in main and handed to every handler

pub struct AppState {
    pub rate_limiter: Arc<RateLimiter>, // shared with the sweeper task
    pub brand: Brand,
}
