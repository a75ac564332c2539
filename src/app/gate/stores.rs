//! Stores the gate reads from and the single write it performs.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::app::{
    db::{self, SpaceRef},
    domain::{OrganizationId, UserRole},
    error::AppError,
};

/// The authenticated user behind a session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub session_id: String,
    pub user_id: String,
    pub role: UserRole,
}

/// Session lookups keyed by the raw session cookie value.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The session's user, or None for unknown or expired tokens.
    async fn get_session(&self, token: &str) -> Result<Option<SessionUser>, AppError>;

    /// The space currently active on the session, if any.
    async fn get_active_space(&self, token: &str) -> Result<Option<SpaceRef>, AppError>;

    /// Make `organization_id` the session's active space. The only write the gate performs.
    async fn set_active_space(&self, token: &str, organization_id: &str) -> Result<(), AppError>;
}

/// Read-only membership lookups.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// A space the user belongs to whose slug or id equals `slug_or_id`.
    async fn find_space_for_user(
        &self,
        slug_or_id: &str,
        user_id: &str,
    ) -> Result<Option<SpaceRef>, AppError>;

    /// The user's earliest membership, or None when they have no spaces.
    async fn first_space_for_user(&self, user_id: &str) -> Result<Option<SpaceRef>, AppError>;
}

/// Both stores backed by the application database.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteStore {
    async fn get_session(&self, token: &str) -> Result<Option<SessionUser>, AppError> {
        let row = db::sessions::find_valid_with_user(&self.pool, token).await?;
        Ok(row.map(|s| SessionUser {
            role: UserRole::from_column(&s.user_role),
            session_id: s.id,
            user_id: s.user_id,
        }))
    }

    async fn get_active_space(&self, token: &str) -> Result<Option<SpaceRef>, AppError> {
        Ok(db::organizations::find_active_for_session(&self.pool, token).await?)
    }

    async fn set_active_space(&self, token: &str, organization_id: &str) -> Result<(), AppError> {
        let organization_id = OrganizationId::from_string(organization_id)
            .map_err(|_| AppError::Validation("Invalid organization id".to_string()))?;
        db::sessions::set_active_organization(&self.pool, token, &organization_id).await?;
        Ok(())
    }
}

#[async_trait]
impl MembershipStore for SqliteStore {
    async fn find_space_for_user(
        &self,
        slug_or_id: &str,
        user_id: &str,
    ) -> Result<Option<SpaceRef>, AppError> {
        Ok(db::organizations::find_member_space(&self.pool, slug_or_id, user_id).await?)
    }

    async fn first_space_for_user(&self, user_id: &str) -> Result<Option<SpaceRef>, AppError> {
        Ok(db::organizations::find_first_member_space(&self.pool, user_id).await?)
    }
}
