use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_documents_table(conn)?;
    create_activity_log_table(conn)?;
    Ok(())
}

/// One row per stored collection (events, interpreters, assignments,
/// groups, positions). Collections are always written whole.
fn create_documents_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            name TEXT PRIMARY KEY,
            body TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create documents table")?;

    Ok(())
}

fn create_activity_log_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS activity_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            action TEXT NOT NULL,
            details TEXT NOT NULL DEFAULT '',
            user TEXT NOT NULL DEFAULT 'local'
        )",
        [],
    )
    .context("Failed to create activity_log table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_activity_log_timestamp ON activity_log(timestamp)",
        [],
    )
    .context("Failed to create activity_log index")?;

    Ok(())
}
