//! Backup and restore of the whole store as one JSON document.
//!
//! ## Document
//!
//! ```json
//! {
//!   "version": 1,
//!   "exportedAt": "2026-10-19T07:45:00.000Z",
//!   "exercises": [{ "id": 1, "name": "Bench Press", "target_body_part": "Chest" }],
//!   "workouts": [{ "id": 1, "date": "2026-10-19T07:45:00.000Z", "note": null }],
//!   "sets": [{ "id": 1, "workout_id": 1, "exercise_id": 1, "weight_kg": 60.0, "reps": 8 }],
//!   "routines": [{ "id": 1, "name": "Push" }],
//!   "routineExercises": [{ "id": 1, "routine_id": 1, "exercise_id": 1, "sort_order": 0 }]
//! }
//! ```
//!
//! `exercises`, `workouts` and `sets` are required. `routines` and
//! `routineExercises` may be absent, as in backups written before routines
//! were included; such a document restores with no routines.
//!
//! ## Import
//!
//! Importing is a full replace, not a merge. The document is validated
//! first (required sections, version, references between rows), then all
//! five relations are emptied and refilled with the document's rows, ids
//! included, in a single transaction. A rejected or failing import leaves
//! the store exactly as it was.
//!
//! ## Host seams
//!
//! Writing the file somewhere the user can reach it and picking a file to
//! restore are platform concerns, behind [`ShareTarget`] and
//! [`BackupPicker`]. [`FileShare`] and [`FilePicker`] are the plain
//! filesystem versions used by the CLI.
//!
//! ```rust
//! use ironvault::db::db::Db;
//! use ironvault::libs::backup::Backup;
//!
//! let db = Db::open_in_memory()?;
//! let backup = Backup::new(&db);
//! let json = serde_json::to_string(&backup.snapshot()?)?;
//! let summary = backup.import_str(&json)?;
//! assert_eq!(summary.exercises, 29);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::db::Db;
use crate::db::exercises::Exercise;
use crate::db::routines::{Routine, RoutineExercise};
use crate::db::schema::{self, SchemaReport};
use crate::db::sets::WorkoutSet;
use crate::db::workouts::{format_instant, Workout};
use crate::libs::error::VaultError;
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest document version this build can read.
pub const BACKUP_VERSION: u32 = 1;

const SELECT_EXERCISES: &str = "SELECT id, name, target_body_part FROM exercises ORDER BY id";
const SELECT_WORKOUTS: &str = "SELECT id, date, note FROM workouts ORDER BY id";
/// Sets that lost their workout or exercise cannot be restored, so they are left out.
const SELECT_SETS: &str = "SELECT id, workout_id, exercise_id, weight_kg, reps FROM sets
    WHERE workout_id IS NOT NULL AND exercise_id IS NOT NULL
    ORDER BY id";
const SELECT_ROUTINES: &str = "SELECT id, name FROM routines ORDER BY id";
const SELECT_ROUTINE_EXERCISES: &str = "SELECT id, routine_id, exercise_id, sort_order FROM routine_exercises ORDER BY id";

/// Children before parents.
const DELETE_ALL: [&str; 5] = [
    "DELETE FROM routine_exercises",
    "DELETE FROM routines",
    "DELETE FROM sets",
    "DELETE FROM workouts",
    "DELETE FROM exercises",
];

const INSERT_EXERCISE: &str = "INSERT INTO exercises (id, name, target_body_part) VALUES (?1, ?2, ?3)";
const INSERT_WORKOUT: &str = "INSERT INTO workouts (id, date, note) VALUES (?1, ?2, ?3)";
const INSERT_SET: &str = "INSERT INTO sets (id, workout_id, exercise_id, weight_kg, reps) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_ROUTINE: &str = "INSERT INTO routines (id, name) VALUES (?1, ?2)";
const INSERT_ROUTINE_EXERCISE: &str = "INSERT INTO routine_exercises (id, routine_id, exercise_id, sort_order) VALUES (?1, ?2, ?3, ?4)";

/// A complete, validated backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: u32,
    pub exported_at: String,
    pub exercises: Vec<Exercise>,
    pub workouts: Vec<Workout>,
    pub sets: Vec<WorkoutSet>,
    pub routines: Vec<Routine>,
    pub routine_exercises: Vec<RoutineExercise>,
}

/// The document as read from disk, before the required sections are checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    version: Option<u32>,
    exported_at: Option<String>,
    exercises: Option<Vec<Exercise>>,
    workouts: Option<Vec<Workout>>,
    sets: Option<Vec<WorkoutSet>>,
    routines: Option<Vec<Routine>>,
    routine_exercises: Option<Vec<RoutineExercise>>,
}

impl RawDocument {
    fn into_document(self) -> Result<BackupDocument, VaultError> {
        let version = self.version.unwrap_or(BACKUP_VERSION);
        if version > BACKUP_VERSION {
            return Err(VaultError::UnsupportedVersion {
                found: version,
                supported: BACKUP_VERSION,
            });
        }

        Ok(BackupDocument {
            version,
            exported_at: self.exported_at.unwrap_or_default(),
            exercises: self.exercises.ok_or(VaultError::MissingSection("exercises"))?,
            workouts: self.workouts.ok_or(VaultError::MissingSection("workouts"))?,
            sets: self.sets.ok_or(VaultError::MissingSection("sets"))?,
            routines: self.routines.unwrap_or_default(),
            routine_exercises: self.routine_exercises.unwrap_or_default(),
        })
    }
}

impl BackupDocument {
    /// Parses and checks a backup without touching any store.
    pub fn parse(json: &str) -> Result<BackupDocument> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let document = raw.into_document()?;
        document.validate()?;
        Ok(document)
    }

    /// Every set and routine entry must point at rows inside the document.
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.version > BACKUP_VERSION {
            return Err(VaultError::UnsupportedVersion {
                found: self.version,
                supported: BACKUP_VERSION,
            });
        }

        let exercise_ids: HashSet<i64> = self.exercises.iter().map(|e| e.id).collect();
        let workout_ids: HashSet<i64> = self.workouts.iter().map(|w| w.id).collect();
        let routine_ids: HashSet<i64> = self.routines.iter().map(|r| r.id).collect();

        for set in &self.sets {
            if !workout_ids.contains(&set.workout_id) {
                return Err(dangling("sets", set.id, "workout", set.workout_id));
            }
            if !exercise_ids.contains(&set.exercise_id) {
                return Err(dangling("sets", set.id, "exercise", set.exercise_id));
            }
        }

        for entry in &self.routine_exercises {
            if !routine_ids.contains(&entry.routine_id) {
                return Err(dangling("routineExercises", entry.id, "routine", entry.routine_id));
            }
            if !exercise_ids.contains(&entry.exercise_id) {
                return Err(dangling("routineExercises", entry.id, "exercise", entry.exercise_id));
            }
        }

        Ok(())
    }
}

fn dangling(section: &'static str, id: i64, target: &'static str, target_id: i64) -> VaultError {
    VaultError::DanglingReference {
        section,
        id,
        target,
        target_id,
    }
}

/// Row counts restored by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub exercises: usize,
    pub workouts: usize,
    pub sets: usize,
    pub routines: usize,
}

/// Where an exported backup goes.
pub trait ShareTarget {
    fn share(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes the backup to disk, creating the parent directory if needed.
pub struct FileShare;

impl ShareTarget for FileShare {
    fn share(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        File::create(path)?.write_all(contents.as_bytes())?;
        Ok(())
    }
}

/// Where a backup to restore comes from.
pub trait BackupPicker {
    /// The chosen document's text, or `None` if the user backed out.
    fn pick(&self) -> Result<Option<String>>;
}

/// Reads a backup from a known path.
pub struct FilePicker {
    path: PathBuf,
}

impl FilePicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FilePicker { path: path.into() }
    }
}

impl BackupPicker for FilePicker {
    fn pick(&self) -> Result<Option<String>> {
        Ok(Some(fs::read_to_string(&self.path)?))
    }
}

pub struct Backup {
    db: Db,
}

impl Backup {
    pub fn new(db: &Db) -> Self {
        Backup { db: db.clone() }
    }

    /// Every row of every relation, ordered by id.
    pub fn snapshot(&self) -> Result<BackupDocument> {
        let conn = self.db.conn();

        Ok(BackupDocument {
            version: BACKUP_VERSION,
            exported_at: format_instant(Utc::now()),
            exercises: select_all(&conn, SELECT_EXERCISES, Exercise::from_row)?,
            workouts: select_all(&conn, SELECT_WORKOUTS, Workout::from_row)?,
            sets: select_all(&conn, SELECT_SETS, WorkoutSet::from_row)?,
            routines: select_all(&conn, SELECT_ROUTINES, Routine::from_row)?,
            routine_exercises: select_all(&conn, SELECT_ROUTINE_EXERCISES, RoutineExercise::from_row)?,
        })
    }

    /// Snapshots the store and hands it to `target` as pretty JSON.
    pub fn export(&self, target: &dyn ShareTarget, path: &Path) -> Result<()> {
        let document = self.snapshot()?;
        let json = serde_json::to_string_pretty(&document)?;
        target.share(path, &json)?;

        msg_debug!(Message::BackupExported(path.display().to_string()));
        Ok(())
    }

    /// Lets the user pick a backup and restores it. `Ok(None)` means the
    /// pick was cancelled and nothing changed.
    pub fn import(&self, picker: &dyn BackupPicker) -> Result<Option<ImportSummary>> {
        match picker.pick()? {
            Some(json) => self.import_str(&json).map(Some),
            None => Ok(None),
        }
    }

    pub fn import_str(&self, json: &str) -> Result<ImportSummary> {
        let document = BackupDocument::parse(json)?;
        self.import_document(&document)
    }

    /// Replaces the whole store with the document's rows.
    pub fn import_document(&self, document: &BackupDocument) -> Result<ImportSummary> {
        document.validate()?;

        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        for sql in DELETE_ALL {
            tx.execute(sql, [])?;
        }

        {
            let mut insert = tx.prepare(INSERT_EXERCISE)?;
            for exercise in &document.exercises {
                insert.execute(params![exercise.id, exercise.name, exercise.target_body_part])?;
            }

            let mut insert = tx.prepare(INSERT_WORKOUT)?;
            for workout in &document.workouts {
                insert.execute(params![workout.id, workout.date, workout.note])?;
            }

            let mut insert = tx.prepare(INSERT_SET)?;
            for set in &document.sets {
                insert.execute(params![set.id, set.workout_id, set.exercise_id, set.weight_kg, set.reps])?;
            }

            let mut insert = tx.prepare(INSERT_ROUTINE)?;
            for routine in &document.routines {
                insert.execute(params![routine.id, routine.name])?;
            }

            let mut insert = tx.prepare(INSERT_ROUTINE_EXERCISE)?;
            for entry in &document.routine_exercises {
                insert.execute(params![entry.id, entry.routine_id, entry.exercise_id, entry.sort_order])?;
            }
        }

        tx.commit()?;

        Ok(ImportSummary {
            exercises: document.exercises.len(),
            workouts: document.workouts.len(),
            sets: document.sets.len(),
            routines: document.routines.len(),
        })
    }

    /// Deletes everything, then reinitializes so the standard catalogue is back.
    pub fn clear(&self) -> Result<SchemaReport> {
        let mut conn = self.db.conn();

        let tx = conn.transaction()?;
        for sql in DELETE_ALL {
            tx.execute(sql, [])?;
        }
        tx.commit()?;

        Ok(schema::initialize(&conn))
    }
}

fn select_all<T>(conn: &Connection, sql: &str, map: fn(&Row) -> rusqlite::Result<T>) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map)?.collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
