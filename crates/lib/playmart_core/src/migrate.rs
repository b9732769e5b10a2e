//! Database migration support.
//!
//! Embeds and runs SQL migrations from `playmart_core/migrations/`.

use sqlx::PgPool;

/// Run all embedded database migrations against the given pool.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("Applying account schema migrations");
    sqlx::migrate!("./migrations").run(pool).await
}
