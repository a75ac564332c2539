use axum::{extract::State, response::Redirect, Json};
use serde::Deserialize;

use crate::app::{
    db,
    domain::{OrganizationId, OrganizationRole, SpaceSlug, UserId},
    error::AppError,
    session::AuthenticatedSession,
    AppState,
};

/// New space request body.
#[derive(Debug, Deserialize)]
pub struct CreateSpaceRequest {
    pub name: String,
    /// Optional explicit slug. Derived from the name when absent.
    pub slug: Option<String>,
}

/// POST /space/new — Create a space owned by the current user as patient.
///
/// Redirects to the new space; the gate makes it active on arrival.
pub async fn submit(
    AuthenticatedSession(session): AuthenticatedSession,
    State(state): State<AppState>,
    Json(body): Json<CreateSpaceRequest>,
) -> Result<Redirect, AppError> {
    let name = body.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::Validation("Name must be 1-100 characters.".to_string()));
    }

    let slug = match body.slug.as_deref() {
        Some(slug) => SpaceSlug::new(slug.trim()),
        None => SpaceSlug::from_name(name),
    }
    .map_err(|e| AppError::Validation(e.to_string()))?;

    if state.config.reserved_space_slugs.iter().any(|r| r == slug.as_str())
        || slug.as_str() == crate::app::gate::DEFAULT_SLUG
    {
        return Err(AppError::Validation("That slug is reserved.".to_string()));
    }
    if db::organizations::find_by_slug(&state.db, slug.as_str()).await?.is_some() {
        return Err(AppError::Validation("That slug is already taken.".to_string()));
    }

    let user_id = UserId::from_string(&session.user_id).map_err(|_| AppError::Internal)?;
    let org = db::NewOrganization {
        id: OrganizationId::new(),
        name: name.to_string(),
        slug,
    };

    let mut tx = state.db.begin().await?;
    db::organizations::insert(&mut *tx, &org)
        .await
        .map_err(slug_conflict)?;
    db::organizations::add_member(&mut *tx, &org.id, &user_id, OrganizationRole::Patient).await?;
    tx.commit().await?;

    tracing::info!(space_id = %org.id, slug = %org.slug, "space created");

    Ok(Redirect::to(&format!(
        "{}/{}",
        state.config.space_path_prefix, org.slug
    )))
}

/// A concurrent create can claim the slug between the lookup and the insert.
fn slug_conflict(err: sqlx::Error) -> AppError {
    let taken = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());
    if taken {
        AppError::Validation("That slug is already taken.".to_string())
    } else {
        AppError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;

    fn organization(slug: &str) -> db::NewOrganization {
        db::NewOrganization {
            id: OrganizationId::new(),
            name: "Journal".to_string(),
            slug: SpaceSlug::new(slug).unwrap(),
        }
    }

    #[tokio::test]
    async fn duplicate_slug_insert_is_a_validation_error() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        db::organizations::insert(&pool, &organization("journal")).await.unwrap();

        let err = db::organizations::insert(&pool, &organization("journal"))
            .await
            .map_err(slug_conflict)
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(msg) if msg == "That slug is already taken."));
    }

    #[test]
    fn other_database_errors_stay_database_errors() {
        assert!(matches!(
            slug_conflict(sqlx::Error::RowNotFound),
            AppError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
