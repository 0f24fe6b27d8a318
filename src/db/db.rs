use super::schema::{self, SchemaReport};
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// The storage session: one SQLite connection for the whole process.
///
/// Built once at startup and cloned into every repository
/// (`Workouts::new(&db)`, `Sets::new(&db)`, ...). Clones share the same
/// connection, and the mutex serializes operations.
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Opens (or creates) the database file and initializes the schema.
    ///
    /// Only a failure to open the file or to enable foreign keys is an
    /// error. Schema problems are logged by [`Db::initialize`] and the
    /// handle is returned anyway, so a damaged store can still be wiped or
    /// restored.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        msg_debug!(Message::DatabaseOpened(path.display().to_string()));
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database with the schema and seed data applied.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        let db = Db {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize();
        Ok(db)
    }

    /// Creates missing relations and seeds the standard exercises.
    ///
    /// Safe to call on every start; never touches existing rows.
    pub fn initialize(&self) -> SchemaReport {
        schema::initialize(&self.conn())
    }

    /// Locks the shared connection for the duration of one operation.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}
