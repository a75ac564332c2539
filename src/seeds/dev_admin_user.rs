use std::env;

use async_trait::async_trait;
use sqlx::SqlitePool;
use time::{Duration, OffsetDateTime};

use crate::app::db::{self, NewOrganization, NewUser};
use crate::app::domain::{OrganizationId, OrganizationRole, SpaceSlug, UserId, UserRole};
use crate::seeds::{Seed, SeedOutcome};

/// Admin user with its own space and a ready-to-use session.
pub struct DevAdminUser;

#[async_trait]
impl Seed for DevAdminUser {
    fn version(&self) -> i64 {
        20260301120000
    }

    fn description(&self) -> &str {
        "dev_admin_user"
    }

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
        let email = match env::var("SEED_ADMIN_EMAIL") {
            Ok(s) if s.contains('@') => s.trim().to_lowercase(),
            _ => return Ok(SeedOutcome::Skipped),
        };
        if db::users::find_by_email(pool, &email).await?.is_some() {
            return Ok(SeedOutcome::Applied);
        }

        let user_id = UserId::new();
        let org_id = OrganizationId::new();
        let slug = SpaceSlug::new("admin-space").map_err(|e| sqlx::Error::Protocol(e.to_string()))?;

        let mut tx = pool.begin().await?;
        db::users::insert(
            &mut *tx,
            &NewUser {
                id: user_id.clone(),
                email: email.clone(),
                name: "Admin".to_string(),
                role: UserRole::Admin,
            },
        )
        .await?;
        db::organizations::insert(
            &mut *tx,
            &NewOrganization {
                id: org_id.clone(),
                name: "Admin Space".to_string(),
                slug,
            },
        )
        .await?;
        db::organizations::add_member(&mut *tx, &org_id, &user_id, OrganizationRole::Patient).await?;
        let expires_at = OffsetDateTime::now_utc() + Duration::days(30);
        let session_id = db::sessions::create(&mut *tx, &user_id, expires_at).await?;
        tx.commit().await?;

        eprintln!("Created admin: {email}");
        eprintln!("Cookie: session_id={session_id}");
        Ok(SeedOutcome::Applied)
    }
}
