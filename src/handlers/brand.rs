use axum::{Json, extract::State};
use std::sync::Arc;
use crate::brand::Brand;
use crate::state::AppState;

pub async fn brand_handler(State(state): State<Arc<AppState>>) -> Json<Brand> {
    Json(state.brand.clone())
}
