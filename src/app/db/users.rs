use sqlx::{FromRow, SqliteExecutor};
use time::OffsetDateTime;

use crate::app::domain::{UserId, UserRole};

/// Database row for users table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: i64,
}

/// Data structure for inserting a new user.
pub struct NewUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

/// Find a user by email address (stored lowercase).
pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        "SELECT id, email, name, role, created_at FROM users WHERE email = ?",
    )
    .bind(email.trim().to_lowercase())
    .fetch_optional(executor)
    .await
}

/// Insert a new user into the database.
pub async fn insert<'e, E>(executor: E, user: &NewUser) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("INSERT INTO users (id, email, name, role, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(user.id.as_str())
        .bind(user.email.trim().to_lowercase())
        .bind(&user.name)
        .bind(user.role.to_string())
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}

/// Total number of users. Used by the admin overview.
pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar("SELECT count(*) FROM users")
        .fetch_one(executor)
        .await
}
