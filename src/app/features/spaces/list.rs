use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::{db, error::AppError, session::AuthenticatedSession, AppState};

/// One row of the space list.
#[derive(Debug, Serialize)]
pub struct SpaceListItem {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub role: String,
    pub joined_at: i64,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct SpaceListResponse {
    pub spaces: Vec<SpaceListItem>,
}

/// GET /spaces — The current user's spaces, active one flagged. Also the space-selection page.
pub async fn show(
    AuthenticatedSession(session): AuthenticatedSession,
    State(state): State<AppState>,
) -> Result<Json<SpaceListResponse>, AppError> {
    let memberships = db::organizations::list_for_user(&state.db, &session.user_id).await?;
    let active = session.active_organization_id.as_deref();

    let spaces = memberships
        .into_iter()
        .map(|m| SpaceListItem {
            active: active == Some(m.id.as_str()),
            id: m.id,
            name: m.name,
            slug: m.slug,
            role: m.role,
            joined_at: m.joined_at,
        })
        .collect();

    Ok(Json(SpaceListResponse { spaces }))
}
