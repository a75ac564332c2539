use sqlx::{FromRow, SqliteExecutor};
use time::OffsetDateTime;

use crate::app::domain::{OrganizationId, UserId};

/// Database row for sessions table.
///
/// `active_organization_id` is the session's active space. It is only written
/// through [`set_active_organization`].
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub active_organization_id: Option<String>,
    pub expires_at: i64,
    pub created_at: i64,
}

/// A valid session joined with its user's site role.
#[derive(Debug, Clone, FromRow)]
pub struct SessionWithUser {
    pub id: String,
    pub user_id: String,
    pub user_role: String,
    pub active_organization_id: Option<String>,
    pub expires_at: i64,
}

/// Create a new session for a user. Returns the session ID.
pub async fn create<'e, E>(
    executor: E,
    user_id: &UserId,
    expires_at: OffsetDateTime,
) -> Result<String, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let session_id = ulid::Ulid::new().to_string();
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query(
        "INSERT INTO sessions (id, user_id, active_organization_id, expires_at, created_at) VALUES (?, ?, NULL, ?, ?)",
    )
    .bind(&session_id)
    .bind(user_id.as_str())
    .bind(expires_at.unix_timestamp())
    .bind(now)
    .execute(executor)
    .await?;

    Ok(session_id)
}

/// Find a valid (non-expired) session by ID.
pub async fn find_valid<'e, E>(executor: E, session_id: &str) -> Result<Option<Session>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query_as::<_, Session>(
        "SELECT id, user_id, active_organization_id, expires_at, created_at FROM sessions WHERE id = ? AND expires_at > ?",
    )
    .bind(session_id)
    .bind(now)
    .fetch_optional(executor)
    .await
}

/// Find a valid session together with its user's role.
pub async fn find_valid_with_user<'e, E>(
    executor: E,
    session_id: &str,
) -> Result<Option<SessionWithUser>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();

    sqlx::query_as::<_, SessionWithUser>(
        "SELECT s.id, s.user_id, u.role AS user_role, s.active_organization_id, s.expires_at \
         FROM sessions s JOIN users u ON u.id = s.user_id \
         WHERE s.id = ? AND s.expires_at > ? AND s.user_id <> ''",
    )
    .bind(session_id)
    .bind(now)
    .fetch_optional(executor)
    .await
}

/// Point the session at a different active space.
pub async fn set_active_organization<'e, E>(
    executor: E,
    session_id: &str,
    organization_id: &OrganizationId,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let result = sqlx::query(
        "UPDATE sessions SET active_organization_id = ? WHERE id = ? AND expires_at > ?",
    )
    .bind(organization_id.as_str())
    .bind(session_id)
    .bind(now)
    .execute(executor)
    .await?;

    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}

/// Delete a session (logout).
pub async fn delete<'e, E>(executor: E, session_id: &str) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(session_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Number of sessions that have not expired yet.
pub async fn count_active<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query_scalar("SELECT count(*) FROM sessions WHERE expires_at > ?")
        .bind(now)
        .fetch_one(executor)
        .await
}
