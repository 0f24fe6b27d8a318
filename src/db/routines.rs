//! Routines: reusable exercise line-ups captured from a real workout.
//!
//! A routine stores only *which* exercises were done and in what order,
//! never weights or reps. Applying it to a session inserts one placeholder
//! set (0 kg × 0) per exercise, a to-do list the user fills in while
//! training.
//!
//! ## Ordering
//!
//! The order is the order exercises first appeared in the source workout,
//! i.e. by the smallest set id per exercise. Sets on A, B, A, C produce the
//! routine A, B, C with `sort_order` 0, 1, 2.
//!
//! ## Atomicity
//!
//! Capturing and applying each run in a single transaction: readers never
//! see a routine without its exercises, or half of a routine's placeholders.
//!
//! ```rust
//! use ironvault::db::{db::Db, routines::Routines, sets::Sets, workouts::Workouts};
//!
//! let db = Db::open_in_memory()?;
//! let workouts = Workouts::new(&db);
//! let monday = workouts.create(None, None)?;
//! Sets::new(&db).add(monday.id, 1, 60.0, 8)?;
//!
//! let routines = Routines::new(&db);
//! let push = routines.create_from_workout(monday.id, "Push")?;
//! let tuesday = workouts.create(None, None)?;
//! let placeholders = routines.apply_to_workout(push.id, tuesday.id)?;
//! assert_eq!(placeholders.len(), 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::db::db::Db;
use crate::libs::error::VaultError;
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_ROUTINE: &str = "INSERT INTO routines (name) VALUES (?1)";
const INSERT_ROUTINE_EXERCISE: &str = "INSERT INTO routine_exercises (routine_id, exercise_id, sort_order) VALUES (?1, ?2, ?3)";
const INSERT_PLACEHOLDER: &str = "INSERT INTO sets (workout_id, exercise_id, weight_kg, reps) VALUES (?1, ?2, 0, 0)";
const SELECT_WORKOUT_EXERCISE_ORDER: &str = "SELECT exercise_id
    FROM sets
    WHERE workout_id = ?1
    GROUP BY exercise_id
    ORDER BY MIN(id) ASC";
const SELECT_ROUTINE_EXERCISE_IDS: &str = "SELECT exercise_id FROM routine_exercises WHERE routine_id = ?1 ORDER BY sort_order ASC";
const SELECT_ALL: &str = "SELECT id, name FROM routines ORDER BY name ASC, id ASC";
const SELECT_BY_ID: &str = "SELECT id, name FROM routines WHERE id = ?1";
const SELECT_ENTRIES: &str = "SELECT re.id, re.routine_id, re.exercise_id, re.sort_order, e.name
    FROM routine_exercises re
    LEFT JOIN exercises e ON re.exercise_id = e.id
    WHERE re.routine_id = ?1
    ORDER BY re.sort_order ASC";
const WORKOUT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM workouts WHERE id = ?1)";
const DELETE_ENTRIES: &str = "DELETE FROM routine_exercises WHERE routine_id = ?1";
const DELETE_ROUTINE: &str = "DELETE FROM routines WHERE id = ?1";

/// A row of the `routines` relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: i64,
    pub name: String,
}

impl Routine {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Routine {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

/// A row of the `routine_exercises` relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub id: i64,
    pub routine_id: i64,
    pub exercise_id: i64,
    /// Position within the routine, 0-based and contiguous.
    pub sort_order: i64,
}

impl RoutineExercise {
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(RoutineExercise {
            id: row.get(0)?,
            routine_id: row.get(1)?,
            exercise_id: row.get(2)?,
            sort_order: row.get(3)?,
        })
    }
}

/// A routine entry with its exercise name, `None` if the exercise is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineEntry {
    pub routine_exercise: RoutineExercise,
    pub exercise_name: Option<String>,
}

pub struct Routines {
    db: Db,
}

impl Routines {
    pub fn new(db: &Db) -> Self {
        Routines { db: db.clone() }
    }

    /// Captures the exercise line-up of a workout as a new named routine.
    ///
    /// Fails without creating anything when the name is blank, the workout
    /// does not exist, or it has no sets.
    pub fn create_from_workout(&self, workout_id: i64, name: &str) -> Result<Routine> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VaultError::InvalidInput("routine name must not be empty".into()).into());
        }

        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        let exists: bool = tx.query_row(WORKOUT_EXISTS, params![workout_id], |row| row.get(0))?;
        if !exists {
            return Err(VaultError::not_found("workout", workout_id).into());
        }

        let exercise_ids = {
            let mut stmt = tx.prepare(SELECT_WORKOUT_EXERCISE_ORDER)?;
            let ids = stmt.query_map(params![workout_id], |row| row.get::<_, i64>(0))?.collect::<Result<Vec<_>, _>>()?;
            ids
        };
        if exercise_ids.is_empty() {
            return Err(VaultError::EmptyWorkout(workout_id).into());
        }

        tx.execute(INSERT_ROUTINE, params![name])?;
        let routine_id = tx.last_insert_rowid();

        {
            let mut insert = tx.prepare(INSERT_ROUTINE_EXERCISE)?;
            for (sort_order, exercise_id) in exercise_ids.iter().enumerate() {
                insert.execute(params![routine_id, exercise_id, sort_order as i64])?;
            }
        }

        tx.commit()?;
        Ok(Routine {
            id: routine_id,
            name: name.to_string(),
        })
    }

    /// Inserts one placeholder set per routine exercise into the workout, in
    /// routine order, and returns the new set ids.
    ///
    /// Existing sets are left alone; applying twice adds the placeholders twice.
    pub fn apply_to_workout(&self, routine_id: i64, workout_id: i64) -> Result<Vec<i64>> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        tx.query_row(SELECT_BY_ID, params![routine_id], Routine::from_row)
            .optional()?
            .ok_or(VaultError::not_found("routine", routine_id))?;
        let exists: bool = tx.query_row(WORKOUT_EXISTS, params![workout_id], |row| row.get(0))?;
        if !exists {
            return Err(VaultError::not_found("workout", workout_id).into());
        }

        let exercise_ids = {
            let mut stmt = tx.prepare(SELECT_ROUTINE_EXERCISE_IDS)?;
            let ids = stmt.query_map(params![routine_id], |row| row.get::<_, i64>(0))?.collect::<Result<Vec<_>, _>>()?;
            ids
        };

        let mut set_ids = Vec::with_capacity(exercise_ids.len());
        {
            let mut insert = tx.prepare(INSERT_PLACEHOLDER)?;
            for exercise_id in exercise_ids {
                insert.execute(params![workout_id, exercise_id])?;
                set_ids.push(tx.last_insert_rowid());
            }
        }

        tx.commit()?;
        Ok(set_ids)
    }

    /// All routines, alphabetically.
    pub fn list(&self) -> Result<Vec<Routine>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let routines = stmt.query_map([], Routine::from_row)?.collect::<Result<Vec<_>, _>>()?;
        Ok(routines)
    }

    pub fn get(&self, routine_id: i64) -> Result<Option<Routine>> {
        let conn = self.db.conn();
        let routine = conn.query_row(SELECT_BY_ID, params![routine_id], Routine::from_row).optional()?;
        Ok(routine)
    }

    /// The routine's exercises in application order.
    pub fn exercises(&self, routine_id: i64) -> Result<Vec<RoutineEntry>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_ENTRIES)?;
        let entries = stmt
            .query_map(params![routine_id], |row| {
                Ok(RoutineEntry {
                    routine_exercise: RoutineExercise::from_row(row)?,
                    exercise_name: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Deletes a routine and its entries. Workouts built from it are untouched.
    pub fn delete(&self, routine_id: i64) -> Result<()> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        tx.execute(DELETE_ENTRIES, params![routine_id])?;
        let affected = tx.execute(DELETE_ROUTINE, params![routine_id])?;
        if affected == 0 {
            return Err(VaultError::not_found("routine", routine_id).into());
        }

        tx.commit()?;
        Ok(())
    }
}
