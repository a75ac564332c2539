use dotenvy::dotenv;
use moodtrace::app;
use moodtrace::seeds::{self, Rerun, SeedStatus};
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = app::config::Config::from_env()
        .expect("Failed to load config (check DATABASE_URL and other env vars)");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await
        .expect("Failed to set busy timeout");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let rerun = Rerun::from_args(env::args().skip(1));
    let reports = match seeds::run_seeds(&pool, &seeds::all_seeds(), rerun).await {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("Seeding failed: {}", e);
            std::process::exit(1);
        }
    };

    for report in reports {
        let note = match report.status {
            SeedStatus::AlreadyApplied => "already applied",
            SeedStatus::Applied => "applied",
            SeedStatus::Skipped => "skipped (env not set)",
        };
        eprintln!("{} {}: {}", report.version, report.description, note);
    }
}
