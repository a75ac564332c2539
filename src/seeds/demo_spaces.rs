use std::env;

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use time::{Duration, OffsetDateTime};

use crate::app::db::{self, NewOrganization, NewUser};
use crate::app::domain::{OrganizationId, OrganizationRole, SpaceSlug, UserId, UserRole};
use crate::seeds::{Seed, SeedOutcome};

const PATIENT_EMAIL: &str = "patient@demo.moodtrace";
const CAREGIVER_EMAIL: &str = "caregiver@demo.moodtrace";

/// A patient and a caregiver sharing the patient's space. The caregiver also has a journal of their own.
pub struct DemoSpaces;

async fn user(conn: &mut SqliteConnection, email: &str, name: &str) -> Result<UserId, sqlx::Error> {
    let id = UserId::new();
    db::users::insert(
        conn,
        &NewUser {
            id: id.clone(),
            email: email.to_string(),
            name: name.to_string(),
            role: UserRole::User,
        },
    )
    .await?;
    Ok(id)
}

async fn space(conn: &mut SqliteConnection, name: &str) -> Result<OrganizationId, sqlx::Error> {
    let id = OrganizationId::new();
    let slug = SpaceSlug::from_name(name).map_err(|e| sqlx::Error::Protocol(e.to_string()))?;
    db::organizations::insert(
        conn,
        &NewOrganization {
            id: id.clone(),
            name: name.to_string(),
            slug,
        },
    )
    .await?;
    Ok(id)
}

/// Insert both users, their spaces, memberships and sessions in one transaction.
/// Returns the (patient, caregiver) session ids.
async fn insert_demo(pool: &SqlitePool) -> Result<(String, String), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let patient = user(&mut *tx, PATIENT_EMAIL, "Pat").await?;
    let caregiver = user(&mut *tx, CAREGIVER_EMAIL, "Casey").await?;

    let pats_journal = space(&mut *tx, "Pat's Journal").await?;
    let caseys_journal = space(&mut *tx, "Casey's Journal").await?;

    let now = OffsetDateTime::now_utc().unix_timestamp();
    db::organizations::add_member_at(&mut *tx, &pats_journal, &patient, OrganizationRole::Patient, now).await?;
    db::organizations::add_member_at(&mut *tx, &caseys_journal, &caregiver, OrganizationRole::Patient, now).await?;
    db::organizations::add_member_at(&mut *tx, &pats_journal, &caregiver, OrganizationRole::Caregiver, now + 1).await?;

    let expires_at = OffsetDateTime::now_utc() + Duration::days(30);
    let patient_session = db::sessions::create(&mut *tx, &patient, expires_at).await?;
    let caregiver_session = db::sessions::create(&mut *tx, &caregiver, expires_at).await?;

    tx.commit().await?;
    Ok((patient_session, caregiver_session))
}

#[async_trait]
impl Seed for DemoSpaces {
    fn version(&self) -> i64 {
        20260302090000
    }

    fn description(&self) -> &str {
        "demo_spaces"
    }

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
        if env::var("SEED_DEMO").map(|v| v != "1").unwrap_or(true) {
            return Ok(SeedOutcome::Skipped);
        }
        if db::users::find_by_email(pool, PATIENT_EMAIL).await?.is_some() {
            return Ok(SeedOutcome::Applied);
        }

        let (patient_session, caregiver_session) = insert_demo(pool).await?;

        eprintln!("Patient cookie: session_id={patient_session}");
        eprintln!("Caregiver cookie: session_id={caregiver_session}");
        Ok(SeedOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn inserts_shared_space() {
        let pool = pool().await;

        insert_demo(&pool).await.unwrap();

        let caregiver = db::users::find_by_email(&pool, CAREGIVER_EMAIL).await.unwrap().unwrap();
        let spaces = db::organizations::list_for_user(&pool, &caregiver.id).await.unwrap();
        assert_eq!(spaces.len(), 2);
    }

    #[tokio::test]
    async fn failure_leaves_nothing_behind() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        user(&mut *conn, CAREGIVER_EMAIL, "Taken").await.unwrap();
        drop(conn);

        assert!(insert_demo(&pool).await.is_err());

        assert!(db::users::find_by_email(&pool, PATIENT_EMAIL).await.unwrap().is_none());
        assert_eq!(db::organizations::count(&pool).await.unwrap(), 0);
    }
}
