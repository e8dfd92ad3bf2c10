use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::{debug, info};
use crate::metrics::{RATE_LIMIT_KEYS, RATE_LIMIT_SWEPT};
use crate::rate_limit::RateLimiter;

// One sweep pass: evict expired records and refresh the gauges
pub fn sweep_once(rate_limiter: &RateLimiter) -> usize {
    let removed = rate_limiter.sweep();
    RATE_LIMIT_SWEPT.inc_by(removed as f64);
    RATE_LIMIT_KEYS.set(rate_limiter.len() as f64);
    removed
}

// Sweeper loop - runs every `period`, never returns
pub async fn sweeper(rate_limiter: Arc<RateLimiter>, period: Duration) {
    let mut interval = interval(period);

    info!("Rate limit sweeper started (interval: {:?})", period);

    loop {
        interval.tick().await;

        let removed = sweep_once(&rate_limiter);
        if removed > 0 {
            debug!(
                removed,
                remaining = rate_limiter.len(),
                "Swept expired rate limit records"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::rate_limit::RateLimitConfig;

    #[tokio::test(start_paused = true)]
    async fn sweeper_evicts_in_the_background() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = Arc::new(RateLimiter::with_clock(
            RateLimitConfig {
                max_attempts: 5,
                window: Duration::from_millis(1_000),
            },
            clock.clone(),
        ));
        limiter.check("1.1.1.1");
        limiter.check("2.2.2.2");

        let task = tokio::spawn(sweeper(limiter.clone(), Duration::from_secs(60)));
        // let the first (immediate) tick run
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(limiter.len(), 2);

        clock.set(2_000);
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(limiter.is_empty());

        task.abort();
    }
}
