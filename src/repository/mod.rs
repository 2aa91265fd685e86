use std::path::Path;
use std::time::Duration;

#[cfg(not(test))]
use rusqlite::OpenFlags;
use rusqlite::{Connection, Result};

use crate::hierarchy;

pub mod entity_repository;
pub mod notification_repository;
pub mod share_repository;
pub mod user_repository;

/// how long a connection waits on another connection's write lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// creates a new connection and returns it, but panics if the connection could not be created
#[cfg(not(test))]
pub fn open_connection() -> Connection {
    use crate::config::DRIVE_CONFIG;

    match Connection::open_with_flags(
        Path::new(DRIVE_CONFIG.database.location.as_str()),
        OpenFlags::default(),
    ) {
        Ok(con) => configure(con),
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

#[cfg(test)]
pub fn open_connection() -> Connection {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    match Connection::open_with_flags(Path::new(db_name.as_str()), rusqlite::OpenFlags::default()) {
        Ok(con) => configure(con),
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

fn configure(con: Connection) -> Connection {
    if let Err(e) = con.busy_timeout(BUSY_TIMEOUT) {
        log::warn!("Failed to set busy timeout on connection: {e:?}");
    }
    con
}

/// returns the current version of the database as a String
fn get_version(con: &Connection) -> Result<String> {
    con.query_row(
        include_str!("../assets/queries/metadata/get_database_version.sql"),
        [],
        |row| row.get(0),
    )
}

/// runs init.sql on the database
fn create_db(con: &Connection) -> Result<()> {
    con.execute_batch(include_str!("../assets/init.sql"))
}

/// handles checking if the database exists, and creates it if not
pub fn initialize_db() -> Result<()> {
    let con = open_connection();
    // table_version will be used once there are more versions of the database
    let table_version = match get_version(&con) {
        Ok(value) => value,
        Err(_) => {
            log::info!("No database found, creating tables...");
            create_db(&con)?;
            get_version(&con)?
        }
    };
    log::debug!("Database is on version {table_version}");
    hierarchy::rebuild(&con)?;
    Ok(())
}
