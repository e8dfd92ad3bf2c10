use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use crate::rate_limit::RateLimitConfig;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "site-guard")]
#[command(about = "Brand info and rate limited contact endpoint for the site")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Max attempts per client per window
    #[arg(long, env = "RATE_LIMIT_MAX_ATTEMPTS", default_value_t = 5,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    // Rate limit window in seconds (15 minutes)
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value_t = 900)]
    pub window_secs: u64,

    // How often expired rate limit records are swept, in seconds
    #[arg(long, env = "RATE_LIMIT_SWEEP_SECS", default_value_t = 60)]
    pub sweep_interval: u64,

    // Site content file with company, phone, email and address
    #[arg(long, env = "SITE_FILE", default_value = "content/site.json")]
    pub site_file: PathBuf,

    // Public website URL, overrides the built-in default
    #[arg(long, env = "SITE_URL")]
    pub site_url: Option<String>,
}

impl Args {
    pub fn rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_attempts: self.max_attempts,
            window: Duration::from_secs(self.window_secs),
        }
    }

    pub fn sweep_period(&self) -> Duration {
        // tokio::time::interval panics on a zero period
        Duration::from_secs(self.sweep_interval.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_five_per_fifteen_minutes() {
        let args = Args::try_parse_from(["site-guard"]).unwrap();
        let config = args.rate_limit_config();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.window, Duration::from_secs(900));
        assert_eq!(args.site_file, PathBuf::from("content/site.json"));
    }

    #[test]
    fn rejects_zero_attempts() {
        assert!(Args::try_parse_from(["site-guard", "--max-attempts", "0"]).is_err());
    }

    #[test]
    fn zero_sweep_interval_is_bumped() {
        let args = Args::try_parse_from(["site-guard", "--sweep-interval", "0"]).unwrap();
        assert_eq!(args.sweep_period(), Duration::from_secs(1));
    }
}
