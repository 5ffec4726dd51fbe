//! Database migration command.
//!
//! Migration files live in `crates/site/migrations/` and are embedded into
//! the binary at compile time.

use tracing::info;

/// Run the site database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url()?;

    info!("Connecting to database...");
    let pool = encore_site::db::create_pool(&database_url).await?;

    info!("Running migrations...");
    sqlx::migrate!("../site/migrations").run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
