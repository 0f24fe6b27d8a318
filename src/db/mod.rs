//! Storage layer for the workout log.
//!
//! Everything lives in one SQLite file with five relations:
//!
//! ```text
//! exercises ──< sets >── workouts
//!     │
//!     └──< routine_exercises >── routines
//! ```
//!
//! [`db::Db`] owns the connection. Each concern gets a small repository
//! built from it, and all of them share the same connection:
//!
//! ```rust
//! use ironvault::db::{db::Db, exercises::Exercises, sets::Sets, stats::Stats, workouts::Workouts};
//!
//! let db = Db::open_in_memory()?;
//! let bench = Exercises::new(&db).find_by_name("Bench Press")?.unwrap();
//! let workout = Workouts::new(&db).create(None, None)?;
//! Sets::new(&db).add(workout.id, bench.id, 100.0, 5)?;
//!
//! let bests = Stats::new(&db).personal_bests()?;
//! assert_eq!(bests[0].max_weight, 100.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Every connection runs with `PRAGMA foreign_keys = ON`. Repositories still
//! check references first so callers get a typed [`VaultError::NotFound`],
//! and deleting a workout removes its sets explicitly.
//!
//! [`VaultError::NotFound`]: crate::libs::error::VaultError::NotFound

/// Connection handle shared by all repositories.
pub mod db;

/// Relations, indexes and the standard exercise catalogue.
pub mod schema;

pub mod exercises;

/// Workout sessions, including cleanup of abandoned ones.
pub mod workouts;

pub mod sets;

/// Volume, personal bests and progression.
pub mod stats;

/// Routines captured from workouts and applied as placeholder sets.
pub mod routines;
