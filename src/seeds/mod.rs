mod demo_spaces;
mod dev_admin_user;

use async_trait::async_trait;
use sqlx::SqlitePool;

/// Outcome of a single seed's own run. Skipped seeds stay unrecorded and are retried next time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Applied,
    Skipped,
}

/// Fixture data for local development, tracked by version in `_moodtrace_seeds`.
#[async_trait]
pub trait Seed: Send + Sync {
    /// YYYYMMDDHHMMSS.
    fn version(&self) -> i64;

    fn description(&self) -> &str;

    async fn run(&self, pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error>;
}

/// Which already-recorded seeds to run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rerun {
    Pending,
    Version(i64),
    All,
}

impl Rerun {
    /// `--force-all` or `--force <version>`; anything else runs pending seeds only.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let mut rerun = Rerun::Pending;
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--force-all" => return Rerun::All,
                "--force" => {
                    if let Some(version) = args.next().and_then(|v| v.as_ref().parse().ok()) {
                        rerun = Rerun::Version(version);
                    }
                }
                _ => {}
            }
        }
        rerun
    }

    fn covers(self, version: i64) -> bool {
        match self {
            Rerun::Pending => false,
            Rerun::Version(v) => v == version,
            Rerun::All => true,
        }
    }
}

/// What happened to one seed during [`run_seeds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedStatus {
    AlreadyApplied,
    Applied,
    Skipped,
}

#[derive(Debug, Clone)]
pub struct SeedReport {
    pub version: i64,
    pub description: String,
    pub status: SeedStatus,
}

/// All seeds in version order.
pub fn all_seeds() -> Vec<Box<dyn Seed>> {
    let mut seeds: Vec<Box<dyn Seed>> = vec![
        Box::new(dev_admin_user::DevAdminUser),
        Box::new(demo_spaces::DemoSpaces),
    ];
    seeds.sort_by_key(|s| s.version());
    seeds
}

/// Run `seeds` against the pool and report each one. Stops at the first failing seed.
///
/// A rerun seed keeps its tracking row until it succeeds again; on success the
/// row's `installed_on` is refreshed.
pub async fn run_seeds(
    pool: &SqlitePool,
    seeds: &[Box<dyn Seed>],
    rerun: Rerun,
) -> Result<Vec<SeedReport>, sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _moodtrace_seeds (
            version INTEGER PRIMARY KEY NOT NULL,
            description TEXT NOT NULL,
            installed_on INTEGER NOT NULL DEFAULT (unixepoch())
        )",
    )
    .execute(pool)
    .await?;

    let recorded: Vec<i64> = sqlx::query_scalar("SELECT version FROM _moodtrace_seeds")
        .fetch_all(pool)
        .await?;

    let mut reports = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let version = seed.version();
        let status = if recorded.contains(&version) && !rerun.covers(version) {
            SeedStatus::AlreadyApplied
        } else {
            match seed.run(pool).await? {
                SeedOutcome::Applied => {
                    sqlx::query(
                        "INSERT INTO _moodtrace_seeds (version, description) VALUES (?, ?)
                         ON CONFLICT (version) DO UPDATE SET installed_on = unixepoch()",
                    )
                    .bind(version)
                    .bind(seed.description())
                    .execute(pool)
                    .await?;
                    SeedStatus::Applied
                }
                SeedOutcome::Skipped => SeedStatus::Skipped,
            }
        };
        tracing::debug!(version, seed = seed.description(), ?status, "seed processed");
        reports.push(SeedReport {
            version,
            description: seed.description().to_string(),
            status,
        });
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        version: i64,
        outcome: SeedOutcome,
        runs: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Seed for Counting {
        fn version(&self) -> i64 {
            self.version
        }

        fn description(&self) -> &str {
            "counting"
        }

        async fn run(&self, _pool: &SqlitePool) -> Result<SeedOutcome, sqlx::Error> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(self.outcome)
        }
    }

    fn counting(version: i64, outcome: SeedOutcome) -> (Box<dyn Seed>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let seed = Counting {
            version,
            outcome,
            runs: runs.clone(),
        };
        (Box::new(seed), runs)
    }

    async fn pool() -> SqlitePool {
        SqlitePool::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn applied_seeds_run_once() {
        let pool = pool().await;
        let (seed, runs) = counting(1, SeedOutcome::Applied);
        let seeds = vec![seed];

        let first = run_seeds(&pool, &seeds, Rerun::Pending).await.unwrap();
        let second = run_seeds(&pool, &seeds, Rerun::Pending).await.unwrap();

        assert_eq!(first[0].status, SeedStatus::Applied);
        assert_eq!(second[0].status, SeedStatus::AlreadyApplied);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn skipped_seeds_are_retried() {
        let pool = pool().await;
        let (seed, runs) = counting(1, SeedOutcome::Skipped);
        let seeds = vec![seed];

        run_seeds(&pool, &seeds, Rerun::Pending).await.unwrap();
        let second = run_seeds(&pool, &seeds, Rerun::Pending).await.unwrap();

        assert_eq!(second[0].status, SeedStatus::Skipped);
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn forced_version_reruns_only_that_seed() {
        let pool = pool().await;
        let (a, a_runs) = counting(1, SeedOutcome::Applied);
        let (b, b_runs) = counting(2, SeedOutcome::Applied);
        let seeds = vec![a, b];
        run_seeds(&pool, &seeds, Rerun::Pending).await.unwrap();

        let reports = run_seeds(&pool, &seeds, Rerun::Version(2)).await.unwrap();

        assert_eq!(reports[0].status, SeedStatus::AlreadyApplied);
        assert_eq!(reports[1].status, SeedStatus::Applied);
        assert_eq!(a_runs.load(Ordering::SeqCst), 1);
        assert_eq!(b_runs.load(Ordering::SeqCst), 2);

        let recorded: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _moodtrace_seeds")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(recorded, 2);
    }

    #[test]
    fn parses_rerun_flags() {
        assert_eq!(Rerun::from_args(["seed"]), Rerun::Pending);
        assert_eq!(Rerun::from_args(["seed", "--force-all"]), Rerun::All);
        assert_eq!(
            Rerun::from_args(["seed", "--force", "20260301120000"]),
            Rerun::Version(20260301120000)
        );
        assert_eq!(Rerun::from_args(["seed", "--force", "soon"]), Rerun::Pending);
    }
}
