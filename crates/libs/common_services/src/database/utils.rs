use app_state::DatabaseSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;

/// Get a database connection pool.
/// # Errors
///
/// * `PgPool::connect` can return an error if the database connection fails.
pub async fn get_db_pool(db_settings: &DatabaseSettings) -> color_eyre::Result<Pool<Postgres>> {
    info!("Connecting to database.");
    let pool = PgPoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connections)
        .max_lifetime(Duration::from_secs(db_settings.max_lifetime))
        .idle_timeout(Duration::from_secs(db_settings.idle_timeout))
        .acquire_timeout(Duration::from_secs(db_settings.acquire_timeout))
        .test_before_acquire(true)
        .connect(&db_settings.url)
        .await?;
    Ok(pool)
}

/// Applies the schema in `migrations/`.
pub async fn run_migrations(pool: &Pool<Postgres>) -> color_eyre::Result<()> {
    info!("Running migrations.");
    sqlx::migrate!("../../../migrations").run(pool).await?;
    Ok(())
}
