//! Exercise catalogue.
//!
//! Exercises are created by the seed catalogue or by the user, never
//! renamed, and only removed by a full wipe or an import. Names are unique
//! in practice only; nothing stops a user from adding a duplicate.
//!
//! ```rust
//! use ironvault::db::{db::Db, exercises::Exercises};
//! use ironvault::libs::body_part::BodyPart;
//!
//! let db = Db::open_in_memory()?;
//! let exercises = Exercises::new(&db);
//! let id = exercises.add("Hip Thrust", Some(BodyPart::Legs))?;
//! let legs = exercises.filter(Some(BodyPart::Legs), Some("thrust"))?;
//! assert_eq!(legs[0].id, id);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::db::Db;
use crate::libs::body_part::BodyPart;
use crate::libs::error::VaultError;
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_EXERCISE: &str = "INSERT INTO exercises (name, target_body_part) VALUES (?1, ?2)";
const SELECT_ALL: &str = "SELECT id, name, target_body_part FROM exercises ORDER BY name ASC, id ASC";
const SELECT_BY_ID: &str = "SELECT id, name, target_body_part FROM exercises WHERE id = ?1";
const SELECT_BY_NAME: &str = "SELECT id, name, target_body_part FROM exercises WHERE name = ?1 ORDER BY id ASC LIMIT 1";
const SELECT_FILTERED: &str = "SELECT id, name, target_body_part FROM exercises
    WHERE (?1 IS NULL OR target_body_part = ?1)
      AND (?2 IS NULL OR instr(LOWER(name), LOWER(?2)) > 0)
    ORDER BY name ASC, id ASC";

/// A row of the `exercises` relation. Field names match the backup format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    /// Category label; `None` or empty for uncategorized exercises.
    pub target_body_part: Option<String>,
}

impl Exercise {
    /// The category, when the stored label is one of the known ones.
    pub fn body_part(&self) -> Option<BodyPart> {
        self.target_body_part.as_deref().and_then(|label| label.parse().ok())
    }

    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Exercise {
            id: row.get(0)?,
            name: row.get(1)?,
            target_body_part: row.get(2)?,
        })
    }
}

pub struct Exercises {
    db: Db,
}

impl Exercises {
    pub fn new(db: &Db) -> Self {
        Exercises { db: db.clone() }
    }

    /// Adds a user-defined exercise and returns its id.
    pub fn add(&self, name: &str, body_part: Option<BodyPart>) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VaultError::InvalidInput("exercise name must not be empty".into()).into());
        }

        let conn = self.db.conn();
        conn.execute(INSERT_EXERCISE, params![name, body_part.map(|part| part.as_str())])?;
        Ok(conn.last_insert_rowid())
    }

    /// Every exercise, alphabetically.
    pub fn list(&self) -> Result<Vec<Exercise>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let exercises = stmt.query_map([], Exercise::from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(exercises)
    }

    pub fn get(&self, id: i64) -> Result<Option<Exercise>> {
        let conn = self.db.conn();
        let exercise = conn.query_row(SELECT_BY_ID, params![id], Exercise::from_row).optional()?;
        Ok(exercise)
    }

    /// Exact, case-sensitive name lookup. With duplicates, the oldest row wins.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Exercise>> {
        let conn = self.db.conn();
        let exercise = conn.query_row(SELECT_BY_NAME, params![name], Exercise::from_row).optional()?;
        Ok(exercise)
    }

    /// Narrows the catalogue by category and a case-insensitive name fragment.
    ///
    /// `None` disables the respective filter; an empty search is treated as `None`.
    pub fn filter(&self, body_part: Option<BodyPart>, search: Option<&str>) -> Result<Vec<Exercise>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_FILTERED)?;
        let exercises = stmt
            .query_map(params![body_part.map(|part| part.as_str()), search], Exercise::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exercises)
    }
}
