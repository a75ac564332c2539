use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::app::{db, error::AppError, session::AuthenticatedSession, tenant, AppState};

/// Summary of a space page.
#[derive(Debug, Serialize)]
pub struct SpaceResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub role: String,
    pub section: String,
}

/// GET /space/:slug — Space home.
pub async fn show(
    auth: AuthenticatedSession,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SpaceResponse>, AppError> {
    render(auth, &state, &slug, String::new()).await
}

/// GET /space/:slug/*rest — Any page inside a space.
pub async fn show_nested(
    auth: AuthenticatedSession,
    State(state): State<AppState>,
    Path((slug, rest)): Path<(String, String)>,
) -> Result<Json<SpaceResponse>, AppError> {
    render(auth, &state, &slug, rest).await
}

/// Only the session's active space renders. Any other space answers 404, including
/// when the gate let the request through without switching.
async fn render(
    AuthenticatedSession(session): AuthenticatedSession,
    state: &AppState,
    slug: &str,
    section: String,
) -> Result<Json<SpaceResponse>, AppError> {
    let org = db::organizations::find_by_slug(&state.db, slug)
        .await?
        .filter(|org| session.active_organization_id.as_deref() == Some(org.id.as_str()))
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    let role = tenant::require_org_member(&state.db, &session.user_id, &org.id).await?;

    Ok(Json(SpaceResponse {
        id: org.id,
        name: org.name,
        slug: org.slug,
        role: role.to_string(),
        section,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::app::domain::{OrganizationId, OrganizationRole, SpaceSlug, UserId, UserRole};
    use crate::app::session::CurrentSession;
    use sqlx::SqlitePool;

    async fn state() -> AppState {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        AppState::new(pool, Config::for_tests())
    }

    async fn space(state: &AppState, slug: &str, member: Option<&UserId>) -> OrganizationId {
        let id = OrganizationId::new();
        db::organizations::insert(
            &state.db,
            &db::NewOrganization {
                id: id.clone(),
                name: slug.to_string(),
                slug: SpaceSlug::new(slug).unwrap(),
            },
        )
        .await
        .unwrap();
        if let Some(user) = member {
            db::organizations::add_member(&state.db, &id, user, OrganizationRole::Patient)
                .await
                .unwrap();
        }
        id
    }

    async fn user(state: &AppState) -> UserId {
        let id = UserId::new();
        db::users::insert(
            &state.db,
            &db::NewUser {
                id: id.clone(),
                email: format!("{}@example.com", id.as_str().to_lowercase()),
                name: "Member".to_string(),
                role: UserRole::User,
            },
        )
        .await
        .unwrap();
        id
    }

    fn session(user: &UserId, active: Option<&OrganizationId>) -> AuthenticatedSession {
        AuthenticatedSession(CurrentSession {
            session_id: "session".to_string(),
            user_id: user.as_str(),
            role: UserRole::User,
            active_organization_id: active.map(|id| id.as_str()),
        })
    }

    #[tokio::test]
    async fn renders_active_space() {
        let state = state().await;
        let user = user(&state).await;
        let alpha = space(&state, "alpha", Some(&user)).await;

        let Json(page) = render(session(&user, Some(&alpha)), &state, "alpha", "moods".to_string())
            .await
            .unwrap();

        assert_eq!(page.id, alpha.as_str());
        assert_eq!(page.role, "patient");
        assert_eq!(page.section, "moods");
    }

    #[tokio::test]
    async fn member_space_that_is_not_active_is_not_found() {
        let state = state().await;
        let user = user(&state).await;
        let alpha = space(&state, "alpha", Some(&user)).await;
        space(&state, "beta", Some(&user)).await;

        let result = render(session(&user, Some(&alpha)), &state, "beta", String::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = render(session(&user, None), &state, "alpha", String::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn active_space_without_membership_is_not_found() {
        let state = state().await;
        let user = user(&state).await;
        let other = space(&state, "other", None).await;

        let result = render(session(&user, Some(&other)), &state, "other", String::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
