use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::app::{config::Config, db, error::AppError, session::AuthenticatedSession, AppState};

/// Admin overview counts.
#[derive(Debug, Serialize)]
pub struct AdminOverview {
    pub users: i64,
    pub spaces: i64,
    pub active_sessions: i64,
}

/// GET /admin — Admin overview. The gate already redirects non-admins; this re-checks.
pub async fn show(
    AuthenticatedSession(session): AuthenticatedSession,
    State(state): State<AppState>,
) -> Result<Json<AdminOverview>, AppError> {
    if !session.role.is_admin() {
        return Err(AppError::NotFound("Not found".to_string()));
    }

    let (users, spaces, active_sessions) = tokio::try_join!(
        db::users::count(&state.db),
        db::organizations::count(&state.db),
        db::sessions::count_active(&state.db),
    )?;

    Ok(Json(AdminOverview {
        users,
        spaces,
        active_sessions,
    }))
}

/// Admin routes.
pub fn routes(config: &Config) -> Router<AppState> {
    Router::new().route(&config.admin_path_prefix, get(show))
}
