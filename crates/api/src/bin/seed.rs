//! `complia-seed` -- loads the versioned notice fixture into the catalog.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default                    | Description                 |
//! |---------------------|----------|----------------------------|-----------------------------|
//! | `DATABASE_URL`      | yes      | --                         | Postgres connection string  |
//! | `SEED_FIXTURE_PATH` | no       | `db/fixtures/notices.json` | Fixture file to apply       |
//!
//! A path given as the first argument takes precedence over
//! `SEED_FIXTURE_PATH`.

use complia_api::telemetry::{self, LogFormat};
use complia_db::seed::{self, NoticeFixture};

/// Fixture applied when neither an argument nor `SEED_FIXTURE_PATH` is given.
const DEFAULT_FIXTURE_PATH: &str = "db/fixtures/notices.json";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    telemetry::init_tracing("complia_seed=info,complia_db=info", LogFormat::from_env());

    let fixture_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SEED_FIXTURE_PATH").ok())
        .unwrap_or_else(|| DEFAULT_FIXTURE_PATH.to_string());

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        tracing::error!("DATABASE_URL environment variable is required");
        std::process::exit(1);
    });

    let fixture = NoticeFixture::from_path(&fixture_path).unwrap_or_else(|e| {
        tracing::error!(path = %fixture_path, error = %e, "Failed to load fixture");
        std::process::exit(1);
    });
    tracing::info!(
        path = %fixture_path,
        version = fixture.version,
        notices = fixture.notices.len(),
        "Loaded notice fixture"
    );

    let pool = complia_db::create_pool(&database_url)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        });

    if let Err(e) = complia_db::run_migrations(&pool).await {
        tracing::error!(error = %e, "Failed to run database migrations");
        std::process::exit(1);
    }

    match seed::apply(&pool, &fixture).await {
        Ok(report) => tracing::info!(
            inserted = report.inserted,
            updated = report.updated,
            keywords = report.keywords,
            "Seeding complete"
        ),
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed");
            std::process::exit(1);
        }
    }

    pool.close().await;
}
