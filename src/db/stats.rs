//! Read-only statistics derived from the raw rows.
//!
//! Nothing here is cached or materialized: every call recomputes from
//! `workouts`, `sets` and `exercises`. A personal log stays in the hundreds
//! to low thousands of rows, so the queries stay cheap.
//!
//! ## Derived values
//!
//! - **Volume**: Σ weight × reps over a workout's sets; `None` for a
//!   workout without sets (not zero).
//! - **Personal best**: the heaviest weight ever lifted for an exercise and
//!   the most reps done at that weight, across all dates.
//! - **Progress**: per workout date, the heaviest set and its reps, with an
//!   Epley one-rep-max estimate.
//!
//! ```rust
//! use ironvault::db::stats::one_rep_max;
//!
//! assert_eq!(one_rep_max(100.0, 5), 117.0);
//! ```

use crate::db::db::Db;
use crate::db::sets::WorkoutSet;
use crate::db::workouts::Workout;
use anyhow::Result;
use rusqlite::{params, OptionalExtension};
use std::collections::HashMap;

const SELECT_WORKOUT_VOLUMES: &str = "SELECT w.id, w.date, w.note, SUM(s.weight_kg * s.reps) AS total_volume
    FROM workouts w
    LEFT JOIN sets s ON w.id = s.workout_id
    GROUP BY w.id
    ORDER BY w.date DESC, w.id DESC";
const SELECT_WORKOUT_EXERCISES: &str = "SELECT s.workout_id, e.name, e.target_body_part
    FROM sets s
    JOIN exercises e ON s.exercise_id = e.id
    WHERE s.workout_id IS NOT NULL
    ORDER BY s.workout_id, s.id";
const SELECT_PERSONAL_BESTS: &str = "SELECT e.id, e.name, s.weight_kg AS max_weight, MAX(s.reps) AS best_reps
    FROM sets s
    JOIN exercises e ON s.exercise_id = e.id
    JOIN (
        SELECT exercise_id, MAX(weight_kg) AS max_w
        FROM sets
        GROUP BY exercise_id
    ) max_sets ON s.exercise_id = max_sets.exercise_id AND s.weight_kg = max_sets.max_w
    GROUP BY e.id, e.name
    ORDER BY e.name ASC, e.id ASC";
const SELECT_PROGRESS_SETS: &str = "SELECT w.date, s.weight_kg, s.reps
    FROM sets s
    JOIN workouts w ON s.workout_id = w.id
    WHERE s.exercise_id = ?1
    ORDER BY w.date ASC, s.weight_kg DESC, s.reps DESC, s.id ASC";
const SELECT_LAST_SET: &str = "SELECT s.id, s.workout_id, s.exercise_id, s.weight_kg, s.reps, w.date
    FROM sets s
    JOIN workouts w ON s.workout_id = w.id
    WHERE s.exercise_id = ?1
    ORDER BY w.date DESC, s.id DESC
    LIMIT 1";

/// One line of the workout history.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub workout: Workout,
    /// `None` when the workout has no sets.
    pub total_volume: Option<f64>,
    /// Distinct exercise names, in the order they were first logged.
    pub exercise_names: Vec<String>,
    /// Distinct body-part labels, in the order they were first logged.
    pub body_parts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalBest {
    pub exercise_id: i64,
    pub exercise_name: String,
    pub max_weight: f64,
    /// Most reps among the sets at `max_weight`.
    pub best_reps: i64,
}

/// One chart point of an exercise's progression.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    /// The workout date the point belongs to.
    pub date: String,
    pub max_weight: f64,
    /// Reps of the set that set `max_weight`.
    pub reps: i64,
    pub one_rep_max: f64,
}

/// The most recent set of an exercise and the date of its workout.
#[derive(Debug, Clone, PartialEq)]
pub struct LastSet {
    pub set: WorkoutSet,
    pub date: String,
}

/// Epley estimate: `round(weight × (1 + reps / 30))`.
pub fn one_rep_max(weight: f64, reps: i64) -> f64 {
    (weight * (1.0 + reps as f64 / 30.0)).round()
}

pub struct Stats {
    db: Db,
}

impl Stats {
    pub fn new(db: &Db) -> Self {
        Stats { db: db.clone() }
    }

    /// Every workout with its volume and the exercises and categories it touched,
    /// most recent first.
    pub fn workout_summaries(&self) -> Result<Vec<WorkoutSummary>> {
        let conn = self.db.conn();

        let mut stmt = conn.prepare(SELECT_WORKOUT_VOLUMES)?;
        let mut summaries = stmt
            .query_map([], |row| {
                Ok(WorkoutSummary {
                    workout: Workout::from_row(row)?,
                    total_volume: row.get(3)?,
                    exercise_names: Vec::new(),
                    body_parts: Vec::new(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let index: HashMap<i64, usize> = summaries
            .iter()
            .enumerate()
            .map(|(position, summary)| (summary.workout.id, position))
            .collect();

        let mut stmt = conn.prepare(SELECT_WORKOUT_EXERCISES)?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, Option<String>>(2)?))
        })?;

        for row in rows {
            let (workout_id, name, body_part) = row?;
            // Orphaned sets have no summary to attach to.
            let Some(&position) = index.get(&workout_id) else {
                continue;
            };
            let summary = &mut summaries[position];

            if !summary.exercise_names.contains(&name) {
                summary.exercise_names.push(name);
            }
            if let Some(label) = body_part.filter(|label| !label.is_empty()) {
                if !summary.body_parts.contains(&label) {
                    summary.body_parts.push(label);
                }
            }
        }

        Ok(summaries)
    }

    /// Heaviest weight and best reps at that weight, per exercise with sets,
    /// alphabetically.
    pub fn personal_bests(&self) -> Result<Vec<PersonalBest>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_PERSONAL_BESTS)?;
        let bests = stmt
            .query_map([], |row| {
                Ok(PersonalBest {
                    exercise_id: row.get(0)?,
                    exercise_name: row.get(1)?,
                    max_weight: row.get(2)?,
                    best_reps: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bests)
    }

    /// Chronological progression for one exercise, one point per workout date.
    pub fn exercise_progress(&self, exercise_id: i64) -> Result<Vec<ProgressPoint>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_PROGRESS_SETS)?;
        let rows = stmt.query_map(params![exercise_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?, row.get::<_, i64>(2)?))
        })?;

        // Rows arrive heaviest-first within each date, so the first row of a
        // date is its representative set.
        let mut points: Vec<ProgressPoint> = Vec::new();
        for row in rows {
            let (date, weight, reps) = row?;
            if points.last().is_some_and(|point| point.date == date) {
                continue;
            }
            points.push(ProgressPoint {
                date,
                max_weight: weight,
                reps,
                one_rep_max: one_rep_max(weight, reps),
            });
        }

        Ok(points)
    }

    /// The latest set logged for an exercise, by workout date then set id.
    pub fn last_set_for_exercise(&self, exercise_id: i64) -> Result<Option<LastSet>> {
        let conn = self.db.conn();
        let last = conn
            .query_row(SELECT_LAST_SET, params![exercise_id], |row| {
                Ok(LastSet {
                    set: WorkoutSet::from_row(row)?,
                    date: row.get(5)?,
                })
            })
            .optional()?;
        Ok(last)
    }
}
