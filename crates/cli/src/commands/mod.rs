//! CLI command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Resolve the database URL from the environment.
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    let url = std::env::var("ENCORE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "ENCORE_DATABASE_URL not set")?;
    Ok(url)
}
