use clap::Parser; // for cli
use site_guard::brand::{Brand, SiteConfig};
use site_guard::config::Args;
use site_guard::rate_limit::RateLimiter;
use site_guard::state::AppState;
use site_guard::sweeper::sweeper;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "site_guard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // parse cli arguments
    let args = Args::parse();

    let site = SiteConfig::load(&args.site_file)?;
    let brand = Brand::new(&site, args.site_url.as_deref());

    // one limiter for the whole process, shared by the router and the sweeper
    let rate_limiter = Arc::new(RateLimiter::new(args.rate_limit_config()));

    tokio::spawn(sweeper(rate_limiter.clone(), args.sweep_period()));

    let state = Arc::new(AppState {
        rate_limiter,
        brand,
    });

    let app = site_guard::router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Site guard running on http://localhost:{}", args.port);
    info!("Serving brand for {} ({})", site.company, args.site_file.display());
    info!(
        "Rate limit: {} attempts per {} seconds",
        args.max_attempts, args.window_secs
    );
    axum::serve(listener, app).await?;
    Ok(())
}
