use sqlx::{FromRow, SqliteExecutor};
use time::OffsetDateTime;

use crate::app::domain::{OrganizationId, OrganizationRole, SpaceSlug, UserId};

/// Database row for organizations table.
#[derive(Debug, Clone, FromRow)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_at: i64,
}

/// Data structure for inserting a new organization.
pub struct NewOrganization {
    pub id: OrganizationId,
    pub name: String,
    pub slug: SpaceSlug,
}

/// Id and canonical slug of a space.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SpaceRef {
    pub id: String,
    pub slug: String,
}

/// A space the user belongs to, with the user's role in it.
#[derive(Debug, Clone, FromRow)]
pub struct Membership {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub role: String,
    pub joined_at: i64,
}

/// Find an organization by its slug.
pub async fn find_by_slug<'e, E>(executor: E, slug: &str) -> Result<Option<Organization>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Organization>(
        "SELECT id, name, slug, created_at FROM organizations WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(executor)
    .await
}

/// Insert a new organization.
pub async fn insert<'e, E>(executor: E, organization: &NewOrganization) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query("INSERT INTO organizations (id, name, slug, created_at) VALUES (?, ?, ?, ?)")
        .bind(organization.id.as_str())
        .bind(&organization.name)
        .bind(organization.slug.as_str())
        .bind(now)
        .execute(executor)
        .await?;
    Ok(())
}

/// Add a user to an organization with a specific role.
pub async fn add_member<'e, E>(
    executor: E,
    organization_id: &OrganizationId,
    user_id: &UserId,
    role: OrganizationRole,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    add_member_at(
        executor,
        organization_id,
        user_id,
        role,
        OffsetDateTime::now_utc().unix_timestamp(),
    )
    .await
}

/// Add a member with an explicit join timestamp. Seeds and tests use this to pin ordering.
pub async fn add_member_at<'e, E>(
    executor: E,
    organization_id: &OrganizationId,
    user_id: &UserId,
    role: OrganizationRole,
    joined_at: i64,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO organization_members (organization_id, user_id, role, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(organization_id.as_str())
    .bind(user_id.as_str())
    .bind(role.to_string())
    .bind(joined_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Find a member's role in an organization. Returns None if not a member.
pub async fn find_member_role<'e, E>(
    executor: E,
    organization_id: &OrganizationId,
    user_id: &UserId,
) -> Result<Option<OrganizationRole>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row: Option<String> = sqlx::query_scalar(
        "SELECT role FROM organization_members WHERE organization_id = ? AND user_id = ?",
    )
    .bind(organization_id.as_str())
    .bind(user_id.as_str())
    .fetch_optional(executor)
    .await?;

    Ok(row.and_then(|r| r.parse::<OrganizationRole>().ok()))
}

/// Find a space the user belongs to whose slug or id equals `slug_or_id`.
///
/// One query for both so existence and fetch cannot disagree.
pub async fn find_member_space<'e, E>(
    executor: E,
    slug_or_id: &str,
    user_id: &str,
) -> Result<Option<SpaceRef>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, SpaceRef>(
        "SELECT o.id, o.slug FROM organizations o \
         JOIN organization_members m ON m.organization_id = o.id \
         WHERE m.user_id = ? AND (o.slug = ? OR o.id = ?) \
         ORDER BY (o.slug = ?) DESC \
         LIMIT 1",
    )
    .bind(user_id)
    .bind(slug_or_id)
    .bind(slug_or_id)
    .bind(slug_or_id)
    .fetch_optional(executor)
    .await
}

/// The user's earliest membership (join time, then space id). None when the user has no spaces.
pub async fn find_first_member_space<'e, E>(
    executor: E,
    user_id: &str,
) -> Result<Option<SpaceRef>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, SpaceRef>(
        "SELECT o.id, o.slug FROM organizations o \
         JOIN organization_members m ON m.organization_id = o.id \
         WHERE m.user_id = ? \
         ORDER BY m.created_at ASC, o.id ASC \
         LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// The space a session currently has active, if it still exists.
pub async fn find_active_for_session<'e, E>(
    executor: E,
    session_id: &str,
) -> Result<Option<SpaceRef>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let now = OffsetDateTime::now_utc().unix_timestamp();
    sqlx::query_as::<_, SpaceRef>(
        "SELECT o.id, o.slug FROM sessions s \
         JOIN organizations o ON o.id = s.active_organization_id \
         WHERE s.id = ? AND s.expires_at > ?",
    )
    .bind(session_id)
    .bind(now)
    .fetch_optional(executor)
    .await
}

/// All spaces a user belongs to, oldest membership first.
pub async fn list_for_user<'e, E>(executor: E, user_id: &str) -> Result<Vec<Membership>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Membership>(
        "SELECT o.id, o.name, o.slug, m.role, m.created_at AS joined_at FROM organizations o \
         JOIN organization_members m ON m.organization_id = o.id \
         WHERE m.user_id = ? \
         ORDER BY m.created_at ASC, o.id ASC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Total number of spaces. Used by the admin overview.
pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar("SELECT count(*) FROM organizations")
        .fetch_one(executor)
        .await
}
