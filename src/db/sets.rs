use crate::db::db::Db;
use crate::libs::error::VaultError;
use anyhow::Result;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

const INSERT_SET: &str = "INSERT INTO sets (workout_id, exercise_id, weight_kg, reps) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_SET: &str = "UPDATE sets SET weight_kg = ?2, reps = ?3 WHERE id = ?1";
const DELETE_SET: &str = "DELETE FROM sets WHERE id = ?1";
const SELECT_FOR_WORKOUT: &str = "SELECT s.id, s.workout_id, s.exercise_id, s.weight_kg, s.reps, e.name
    FROM sets s
    JOIN exercises e ON s.exercise_id = e.id
    WHERE s.workout_id = ?1
    ORDER BY s.id DESC";
const COUNT_FOR_WORKOUT: &str = "SELECT COUNT(*) FROM sets WHERE workout_id = ?1";
const WORKOUT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM workouts WHERE id = ?1)";
const EXERCISE_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?1)";

/// A row of the `sets` relation. Field names match the backup format.
///
/// `weight_kg == 0.0 && reps == 0` marks a placeholder inserted by a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub weight_kg: f64,
    pub reps: i64,
}

impl WorkoutSet {
    pub fn is_placeholder(&self) -> bool {
        self.weight_kg == 0.0 && self.reps == 0
    }

    /// weight × reps
    pub fn volume(&self) -> f64 {
        self.weight_kg * self.reps as f64
    }

    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(WorkoutSet {
            id: row.get(0)?,
            workout_id: row.get(1)?,
            exercise_id: row.get(2)?,
            weight_kg: row.get(3)?,
            reps: row.get(4)?,
        })
    }
}

/// A set together with the name of its exercise, for session views.
#[derive(Debug, Clone, PartialEq)]
pub struct SetWithExercise {
    pub set: WorkoutSet,
    pub exercise_name: String,
}

pub struct Sets {
    db: Db,
}

impl Sets {
    pub fn new(db: &Db) -> Self {
        Sets { db: db.clone() }
    }

    /// Logs a set. Both the workout and the exercise must exist.
    pub fn add(&self, workout_id: i64, exercise_id: i64, weight_kg: f64, reps: i64) -> Result<i64> {
        validate(weight_kg, reps)?;

        let conn = self.db.conn();
        ensure_exists(&conn, WORKOUT_EXISTS, "workout", workout_id)?;
        ensure_exists(&conn, EXERCISE_EXISTS, "exercise", exercise_id)?;

        conn.execute(INSERT_SET, params![workout_id, exercise_id, weight_kg, reps])?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update(&self, set_id: i64, weight_kg: f64, reps: i64) -> Result<()> {
        validate(weight_kg, reps)?;

        let affected = self.db.conn().execute(UPDATE_SET, params![set_id, weight_kg, reps])?;
        if affected == 0 {
            return Err(VaultError::not_found("set", set_id).into());
        }
        Ok(())
    }

    /// Removes one set. The workout stays, even if it is now empty.
    pub fn delete(&self, set_id: i64) -> Result<()> {
        let affected = self.db.conn().execute(DELETE_SET, params![set_id])?;
        if affected == 0 {
            return Err(VaultError::not_found("set", set_id).into());
        }
        Ok(())
    }

    /// The workout's sets, most recently logged first.
    pub fn for_workout(&self, workout_id: i64) -> Result<Vec<SetWithExercise>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_FOR_WORKOUT)?;
        let sets = stmt
            .query_map(params![workout_id], |row| {
                Ok(SetWithExercise {
                    set: WorkoutSet::from_row(row)?,
                    exercise_name: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sets)
    }

    pub fn count_for_workout(&self, workout_id: i64) -> Result<usize> {
        let count: i64 = self.db.conn().query_row(COUNT_FOR_WORKOUT, params![workout_id], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn validate(weight_kg: f64, reps: i64) -> Result<(), VaultError> {
    if !weight_kg.is_finite() || weight_kg < 0.0 {
        return Err(VaultError::InvalidInput(format!("weight must be a non-negative number, got {}", weight_kg)));
    }
    if reps < 0 {
        return Err(VaultError::InvalidInput(format!("reps must not be negative, got {}", reps)));
    }
    Ok(())
}

fn ensure_exists(conn: &Connection, sql: &str, entity: &'static str, id: i64) -> Result<()> {
    let exists: bool = conn.query_row(sql, params![id], |row| row.get(0))?;
    if !exists {
        return Err(VaultError::not_found(entity, id).into());
    }
    Ok(())
}
