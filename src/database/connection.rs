use crate::error::{Result, StoreError};
use log::debug;
use rusqlite::Connection;

// Embed migrations from the migrations directory
refinery::embed_migrations!("migrations");

/// Opens the database, turns on foreign key enforcement and applies the embedded schema
pub fn init_connection(db_path: &str) -> Result<Connection> {
    let mut conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    migrations::runner()
        .run(&mut conn)
        .map_err(|e| StoreError::Migration(e.to_string()))?;
    debug!("Migrations completed successfully for {}", db_path);

    Ok(conn)
}
