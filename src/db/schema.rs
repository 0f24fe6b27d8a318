//! Relations, indexes and the standard exercise catalogue.
//!
//! Initialization is a list of named steps run one by one against the
//! connection. Each step is `IF NOT EXISTS`, so a store that already has
//! some of the relations (an older install, a half-finished first run)
//! only gets the missing pieces. A failing step is logged and recorded in
//! the [`SchemaReport`]; the remaining steps still run.
//!
//! ```rust
//! use ironvault::db::db::Db;
//!
//! let db = Db::open_in_memory()?;
//! let report = db.initialize();
//! assert!(report.is_clean());
//! assert_eq!(report.seeded, 0); // already seeded by open
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::body_part::BodyPart;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection};

/// A single idempotent DDL statement.
#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        name: "create_exercises",
        sql: "CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            target_body_part TEXT
        )",
    },
    SchemaStep {
        name: "create_workouts",
        sql: "CREATE TABLE IF NOT EXISTS workouts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            note TEXT
        )",
    },
    SchemaStep {
        name: "create_sets",
        sql: "CREATE TABLE IF NOT EXISTS sets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            workout_id INTEGER,
            exercise_id INTEGER,
            weight_kg REAL,
            reps INTEGER,
            FOREIGN KEY (workout_id) REFERENCES workouts (id),
            FOREIGN KEY (exercise_id) REFERENCES exercises (id)
        )",
    },
    SchemaStep {
        name: "create_routines",
        sql: "CREATE TABLE IF NOT EXISTS routines (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )",
    },
    SchemaStep {
        name: "create_routine_exercises",
        sql: "CREATE TABLE IF NOT EXISTS routine_exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            routine_id INTEGER,
            exercise_id INTEGER,
            sort_order INTEGER,
            FOREIGN KEY (routine_id) REFERENCES routines (id),
            FOREIGN KEY (exercise_id) REFERENCES exercises (id)
        )",
    },
    SchemaStep {
        name: "index_sets_workout",
        sql: "CREATE INDEX IF NOT EXISTS idx_sets_workout_id ON sets(workout_id)",
    },
    SchemaStep {
        name: "index_sets_exercise",
        sql: "CREATE INDEX IF NOT EXISTS idx_sets_exercise_id ON sets(exercise_id)",
    },
    SchemaStep {
        name: "index_workouts_date",
        sql: "CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(date)",
    },
    SchemaStep {
        name: "index_routine_exercises_routine",
        sql: "CREATE INDEX IF NOT EXISTS idx_routine_exercises_routine_id ON routine_exercises(routine_id)",
    },
];

/// The five relations owned by the data layer.
pub const TABLES: [&str; 5] = ["exercises", "workouts", "sets", "routines", "routine_exercises"];

const COUNT_EXERCISE_BY_NAME: &str = "SELECT COUNT(*) FROM exercises WHERE name = ?1";
const INSERT_EXERCISE: &str = "INSERT INTO exercises (name, target_body_part) VALUES (?1, ?2)";

/// Catalogue inserted on first start and after every wipe.
pub const STANDARD_EXERCISES: &[(&str, BodyPart)] = &[
    ("Bench Press", BodyPart::Chest),
    ("Incline Bench Press", BodyPart::Chest),
    ("Dumbbell Press", BodyPart::Chest),
    ("Cable Fly", BodyPart::Chest),
    ("Deadlift", BodyPart::Back),
    ("Pull Up", BodyPart::Back),
    ("Lat Pulldown", BodyPart::Back),
    ("Bent Over Row", BodyPart::Back),
    ("Seated Cable Row", BodyPart::Back),
    ("Squat", BodyPart::Legs),
    ("Leg Press", BodyPart::Legs),
    ("Lunges", BodyPart::Legs),
    ("Leg Extension", BodyPart::Legs),
    ("Leg Curl", BodyPart::Legs),
    ("Calf Raise", BodyPart::Legs),
    ("Overhead Press", BodyPart::Shoulders),
    ("Dumbbell Shoulder Press", BodyPart::Shoulders),
    ("Lateral Raise", BodyPart::Shoulders),
    ("Front Raise", BodyPart::Shoulders),
    ("Face Pull", BodyPart::Shoulders),
    ("Barbell Curl", BodyPart::Biceps),
    ("Dumbbell Curl", BodyPart::Biceps),
    ("Tricep Extension", BodyPart::Triceps),
    ("Skullcrusher", BodyPart::Triceps),
    ("Dips", BodyPart::Triceps),
    ("Crunch", BodyPart::Core),
    ("Plank", BodyPart::Core),
    ("Leg Raise", BodyPart::Core),
    ("Ab Wheel", BodyPart::Core),
];

/// What an initialization pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaReport {
    /// Names of the DDL steps that failed.
    pub failed_steps: Vec<&'static str>,
    /// Catalogue rows inserted by this pass.
    pub seeded: usize,
    pub seed_failed: bool,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.failed_steps.is_empty() && !self.seed_failed
    }
}

/// Runs every schema step, then seeds the catalogue. Never fails; problems
/// are logged and reported.
pub fn initialize(conn: &Connection) -> SchemaReport {
    let mut report = SchemaReport::default();

    for step in SCHEMA_STEPS {
        if let Err(e) = conn.execute(step.sql, []) {
            msg_error!(Message::SchemaStepFailed(step.name.to_string(), e.to_string()));
            report.failed_steps.push(step.name);
        }
    }

    match seed_exercises(conn) {
        Ok(seeded) => {
            if seeded > 0 {
                msg_debug!(Message::ExercisesSeeded(seeded));
            }
            report.seeded = seeded;
        }
        Err(e) => {
            msg_error!(Message::SeedFailed(e.to_string()));
            report.seed_failed = true;
        }
    }

    report
}

/// Inserts each catalogue exercise whose name is not present yet.
fn seed_exercises(conn: &Connection) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;

    {
        let mut count_stmt = tx.prepare(COUNT_EXERCISE_BY_NAME)?;
        let mut insert_stmt = tx.prepare(INSERT_EXERCISE)?;

        for (name, body_part) in STANDARD_EXERCISES {
            let count: i64 = count_stmt.query_row(params![name], |row| row.get(0))?;
            if count == 0 {
                insert_stmt.execute(params![name, body_part.as_str()])?;
                inserted += 1;
            }
        }
    }

    tx.commit()?;
    Ok(inserted)
}
