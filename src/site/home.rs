use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::app::{AppState, APP_NAME};

/// GET /
///
/// Signed-in visitors never get here; the gate sends them to the space list.
pub async fn index() -> Json<Value> {
    Json(json!({
        "app": APP_NAME,
        "tagline": "Track moods and medications, together with your caregiver.",
    }))
}

/// Routes for the home feature slice.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
