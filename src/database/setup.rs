use anyhow::{Context, Result};

use super::connection::DbConn;

/// Apply `schema.sql`, dropping any existing tables first.
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    conn.execute_batch(schema_sql)
        .context("Failed to apply database schema")?;

    log::info!("Database schema applied");
    Ok(())
}
