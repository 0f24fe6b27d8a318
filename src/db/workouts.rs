//! Workout sessions and the housekeeping that keeps them meaningful.
//!
//! A workout is an instant (`date`, ISO-8601 in UTC with millisecond
//! precision) plus an optional note. It owns its sets, but the storage
//! engine does not cascade: deleting a workout removes its sets
//! explicitly, inside the same transaction.
//!
//! ## Abandoned workouts
//!
//! Starting a session creates the row immediately, so a user who opens a
//! session and walks away leaves an empty workout behind. A workout with
//! no sets and no note is *abandoned*:
//!
//! - [`Workouts::finish`] discards it when the user closes the session.
//! - [`Workouts::cleanup_empty`] sweeps all of them; the history view runs
//!   it before listing. It is not run after individual set mutations.
//!
//! A note or a single set, even a placeholder, protects a workout.

use crate::db::db::Db;
use crate::libs::error::VaultError;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, SecondsFormat, TimeZone, Utc};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_WORKOUT: &str = "INSERT INTO workouts (date, note) VALUES (?1, ?2)";
const SELECT_BY_ID: &str = "SELECT id, date, note FROM workouts WHERE id = ?1";
const SELECT_LATEST: &str = "SELECT id, date, note FROM workouts ORDER BY date DESC, id DESC LIMIT 1";
const COUNT_SETS: &str = "SELECT COUNT(*) FROM sets WHERE workout_id = ?1";
const DELETE_SETS: &str = "DELETE FROM sets WHERE workout_id = ?1";
const DELETE_WORKOUT: &str = "DELETE FROM workouts WHERE id = ?1";
const DELETE_ABANDONED: &str = "DELETE FROM workouts
    WHERE id NOT IN (SELECT DISTINCT workout_id FROM sets WHERE workout_id IS NOT NULL)
      AND (note IS NULL OR note = '')";

/// A row of the `workouts` relation. Field names match the backup format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    /// Session instant as stored, e.g. `2026-10-19T07:45:00.000Z`.
    pub date: String,
    pub note: Option<String>,
}

impl Workout {
    /// The stored date parsed as an instant; `None` for unparseable legacy values.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date).ok().map(|date| date.with_timezone(&Utc))
    }

    /// The calendar day the session falls on in the local time zone.
    pub fn local_day(&self) -> Option<NaiveDate> {
        self.instant().map(|instant| instant.with_timezone(&Local).date_naive())
    }

    /// `YYYY-MM-DD` of [`Workout::local_day`], or the raw stored value.
    pub fn day_label(&self) -> String {
        day_label(&self.date)
    }

    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|note| !note.is_empty())
    }

    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Workout {
            id: row.get(0)?,
            date: row.get(1)?,
            note: row.get(2)?,
        })
    }
}

/// Outcome of closing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Kept { sets: usize },
    /// The workout was abandoned and has been deleted.
    Discarded,
}

/// Formats an instant the way workout dates are stored.
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Local `YYYY-MM-DD` for a stored date; unparseable values are returned as is.
pub fn day_label(date: &str) -> String {
    DateTime::parse_from_rfc3339(date)
        .map(|instant| instant.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Parses a user-entered `YYYY-MM-DD` date, rejecting days that do not exist.
pub fn session_date(input: &str) -> Result<NaiveDate, VaultError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| VaultError::InvalidDate(input.trim().to_string()))
}

pub struct Workouts {
    db: Db,
}

impl Workouts {
    pub fn new(db: &Db) -> Self {
        Workouts { db: db.clone() }
    }

    /// Inserts a workout at `at` (now when `None`). An empty note is stored as NULL.
    pub fn create(&self, note: Option<&str>, at: Option<DateTime<Utc>>) -> Result<Workout> {
        let date = format_instant(at.unwrap_or_else(Utc::now));
        let note = note.filter(|note| !note.is_empty()).map(str::to_string);

        let conn = self.db.conn();
        conn.execute(INSERT_WORKOUT, params![date, note])?;

        Ok(Workout {
            id: conn.last_insert_rowid(),
            date,
            note,
        })
    }

    /// Logs a session on a past (or future) calendar day, at local midnight.
    pub fn create_on(&self, day: NaiveDate, note: Option<&str>) -> Result<Workout> {
        let midnight = day.and_time(chrono::NaiveTime::MIN);
        let instant = Local
            .from_local_datetime(&midnight)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| midnight.and_utc());

        self.create(note, Some(instant))
    }

    pub fn get(&self, id: i64) -> Result<Option<Workout>> {
        let conn = self.db.conn();
        let workout = conn.query_row(SELECT_BY_ID, params![id], Workout::from_row).optional()?;
        Ok(workout)
    }

    /// The workout with the greatest date; ties go to the newest row.
    pub fn latest(&self) -> Result<Option<Workout>> {
        let conn = self.db.conn();
        let workout = conn.query_row(SELECT_LATEST, [], Workout::from_row).optional()?;
        Ok(workout)
    }

    /// Returns today's workout if the latest one falls on `now`'s calendar
    /// day, otherwise starts a new one at `now`. The flag is `true` when a
    /// workout was created.
    pub fn resume_or_start(&self, now: DateTime<Local>) -> Result<(Workout, bool)> {
        if let Some(latest) = self.latest()? {
            if latest.local_day() == Some(now.date_naive()) {
                return Ok((latest, false));
            }
        }

        let workout = self.create(None, Some(now.with_timezone(&Utc)))?;
        Ok((workout, true))
    }

    /// Deletes a workout together with its sets.
    pub fn delete(&self, id: i64) -> Result<()> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        tx.execute(DELETE_SETS, params![id])?;
        let affected = tx.execute(DELETE_WORKOUT, params![id])?;
        if affected == 0 {
            return Err(VaultError::not_found("workout", id).into());
        }

        tx.commit()?;
        Ok(())
    }

    /// Closes a session, discarding it when it turned out to be abandoned.
    pub fn finish(&self, id: i64) -> Result<Finish> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        let workout = tx
            .query_row(SELECT_BY_ID, params![id], Workout::from_row)
            .optional()?
            .ok_or(VaultError::not_found("workout", id))?;
        let sets: i64 = tx.query_row(COUNT_SETS, params![id], |row| row.get(0))?;

        if sets == 0 && !workout.has_note() {
            tx.execute(DELETE_WORKOUT, params![id])?;
            tx.commit()?;
            return Ok(Finish::Discarded);
        }

        Ok(Finish::Kept { sets: sets as usize })
    }

    /// Deletes every abandoned workout and returns how many were removed.
    pub fn cleanup_empty(&self) -> Result<usize> {
        let conn = self.db.conn();
        let deleted = conn.execute(DELETE_ABANDONED, [])?;
        Ok(deleted)
    }
}
