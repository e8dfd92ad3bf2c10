use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::info;
use crate::error::ApiError;
use crate::models::{ContactRequest, ContactResponse};
use crate::state::AppState;

fn validate(payload: &ContactRequest) -> Result<(), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    if !payload.email.contains('@') {
        return Err(ApiError::Validation("a valid email is required".to_string()));
    }
    if payload.message.trim().is_empty() {
        return Err(ApiError::Validation("message is required".to_string()));
    }
    Ok(())
}

// Sits behind the rate limit middleware; nothing is stored
pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    validate(&payload)?;

    info!(
        message_len = payload.message.len(),
        "Contact request received"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactResponse {
            status: "received".to_string(),
            company: state.brand.company.clone(),
            phone: state.brand.phone.clone(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn validation() {
        assert!(validate(&request("Ann", "ann@example.com", "Hi")).is_ok());
        assert!(validate(&request(" ", "ann@example.com", "Hi")).is_err());
        assert!(validate(&request("Ann", "not-an-email", "Hi")).is_err());
        assert!(validate(&request("Ann", "ann@example.com", "")).is_err());
    }
}
