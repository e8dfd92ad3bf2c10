mod brand;
mod contact;
mod health;
mod metrics;

pub use brand::brand_handler;
pub use contact::contact_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
