use serde::{Deserialize, Serialize};

// Contact form submission
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

// Acknowledgement, with how to reach us directly
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ContactResponse {
    pub status: String,
    pub company: String,
    pub phone: String,
}

// Body of a 429
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct RateLimitedResponse {
    pub error: String,
    pub remaining: u32,
    pub reset_time: u64,
}
