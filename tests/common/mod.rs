#![allow(dead_code)]

use axum::body::Body;
use axum::response::Response;
use http_body_util::BodyExt;
use moodtrace::app::{
    config::Config,
    db,
    domain::{OrganizationId, OrganizationRole, SpaceSlug, UserId, UserRole},
    AppState,
};
use moodtrace::create_router;
use sqlx::SqlitePool;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_router(pool: SqlitePool) -> axum::Router {
    create_router(AppState::new(pool, Config::for_tests()))
}

/// Insert a user directly. Sign-in is owned by the auth provider, so tests bypass it.
pub async fn create_user(pool: &SqlitePool, email: &str, role: UserRole) -> UserId {
    let id = UserId::new();
    db::users::insert(
        pool,
        &db::NewUser {
            id: id.clone(),
            email: email.to_string(),
            name: email.split('@').next().unwrap_or_default().to_string(),
            role,
        },
    )
    .await
    .unwrap();
    id
}

pub async fn create_space(pool: &SqlitePool, name: &str, slug: &str) -> OrganizationId {
    let id = OrganizationId::new();
    db::organizations::insert(
        pool,
        &db::NewOrganization {
            id: id.clone(),
            name: name.to_string(),
            slug: SpaceSlug::new(slug).unwrap(),
        },
    )
    .await
    .unwrap();
    id
}

/// Change a space's slug in place, as an out-of-band rename would.
pub async fn rename_space(pool: &SqlitePool, space: &OrganizationId, slug: &str) {
    sqlx::query("UPDATE organizations SET slug = ? WHERE id = ?")
        .bind(slug)
        .bind(space.as_str())
        .execute(pool)
        .await
        .unwrap();
}

pub async fn add_member(pool: &SqlitePool, space: &OrganizationId, user: &UserId, joined_at: i64) {
    db::organizations::add_member_at(pool, space, user, OrganizationRole::Patient, joined_at)
        .await
        .unwrap();
}

/// Create a session for the user and return the cookie header value.
pub async fn session_cookie(pool: &SqlitePool, user: &UserId) -> String {
    let expires_at = OffsetDateTime::now_utc() + Duration::days(30);
    let session_id = db::sessions::create(pool, user, expires_at).await.unwrap();
    format!("session_id={}", session_id)
}

/// Create an already-expired session and return its cookie header value.
pub async fn expired_cookie(pool: &SqlitePool, user: &UserId) -> String {
    let expires_at = OffsetDateTime::now_utc() - Duration::hours(1);
    let session_id = db::sessions::create(pool, user, expires_at).await.unwrap();
    format!("session_id={}", session_id)
}

pub fn session_id(cookie: &str) -> &str {
    cookie.strip_prefix("session_id=").expect("cookie must contain session_id")
}

/// The session's active space id, straight from the database.
pub async fn active_space_id(pool: &SqlitePool, cookie: &str) -> Option<String> {
    db::sessions::find_valid(pool, session_id(cookie))
        .await
        .unwrap()
        .expect("session should be valid")
        .active_organization_id
}

pub async fn get(app: &axum::Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = http::Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("location")
        .map(|v| v.to_str().unwrap())
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
