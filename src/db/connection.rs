use std::fs;
use std::path::Path;

use rusqlite::Connection;

use crate::error::OrderdeskError;

use super::migrations;

/// Open a connection to an existing database. Returns an error if the file
/// has not been created with `init_db` yet.
pub fn open_db(path: &Path) -> Result<Connection, OrderdeskError> {
    if !path.exists() {
        return Err(OrderdeskError::database(format!(
            "database not found at {}. Run `orderdesk init` first.",
            path.display()
        )));
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create parent directories, the database file,
/// and the tables.
pub fn init_db(path: &Path) -> Result<Connection, OrderdeskError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| OrderdeskError::database(e.to_string()))?;
        }
    }
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), OrderdeskError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
