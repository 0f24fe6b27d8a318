//! Text catalogue for [`Message`].
//!
//! All wording is kept in this one `match` so call sites stay free of
//! string literals and every variant has exactly one rendering.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let s = match self {
            // === STORAGE MESSAGES ===
            Message::SchemaStepFailed(step, error) => format!("Schema step '{}' failed: {}", step, error),
            Message::SeedFailed(error) => format!("Failed to seed the exercise catalogue: {}", error),
            Message::ExercisesSeeded(count) => format!("Added {} standard exercises", count),
            Message::DatabaseOpened(path) => format!("Opened database at {}", path),
            Message::QueryFailed(error) => format!("Query failed: {}", error),

            // === WORKOUT MESSAGES ===
            Message::WorkoutStarted(id, date) => format!("Started workout #{} ({})", id, date),
            Message::WorkoutResumed(id, date) => format!("Resuming today's workout #{} ({})", id, date),
            Message::WorkoutDiscarded(id) => format!("Workout #{} had no sets and was discarded", id),
            Message::WorkoutKept(id, sets) => format!("Workout #{} saved with {} set(s)", id, sets),
            Message::WorkoutDeleted(id) => format!("Workout #{} deleted", id),
            Message::ConfirmDeleteWorkout(id) => format!("Delete workout #{} and all of its sets?", id),
            Message::EmptyWorkoutsCleaned(count) => format!("Removed {} abandoned workout(s)", count),
            Message::WorkoutHistoryHeader => "Workout history:".to_string(),
            Message::NoWorkoutsFound => "No workouts logged yet.".to_string(),
            Message::WorkoutSetsHeader(id, date) => format!("Workout #{} on {}", id, date),
            Message::NoSetsLogged(id) => format!("No sets logged for workout #{}", id),

            // === SET MESSAGES ===
            Message::SetLogged(id, weight, reps) => format!("Logged set #{}: {} kg x {}", id, weight, reps),
            Message::SetUpdated(id) => format!("Set #{} updated", id),
            Message::SetDeleted(id) => format!("Set #{} deleted", id),
            Message::LastSet(exercise, weight, reps, date) => {
                format!("Last {}: {} kg x {} ({})", exercise, weight, reps, date)
            }
            Message::NoPreviousSet(exercise) => format!("No previous sets for {}", exercise),

            // === EXERCISE MESSAGES ===
            Message::ExerciseAdded(name, id) => format!("Exercise '{}' added with id {}", name, id),
            Message::ExerciseNotFound(name) => format!("No exercise named '{}'", name),
            Message::ExercisesHeader => "Exercises:".to_string(),
            Message::NoExercisesFound => "No exercises match.".to_string(),

            // === STATS MESSAGES ===
            Message::PersonalBestsHeader => "Personal bests:".to_string(),
            Message::NoPersonalBests => "No sets logged yet, nothing to rank.".to_string(),
            Message::ProgressHeader(exercise) => format!("Progress for {}:", exercise),
            Message::NotEnoughProgressData => "Log at least 2 sessions to see a trend.".to_string(),

            // === ROUTINE MESSAGES ===
            Message::RoutineSaved(name, count) => format!("Routine '{}' saved with {} exercise(s)", name, count),
            Message::RoutineApplied(name, count, workout) => {
                format!("Routine '{}' added {} placeholder set(s) to workout #{}", name, count, workout)
            }
            Message::RoutineDeleted(name) => format!("Routine '{}' deleted", name),
            Message::ConfirmDeleteRoutine(name) => format!("Delete routine '{}'?", name),
            Message::RoutinesHeader => "Routines:".to_string(),
            Message::RoutineHeader(name) => format!("Routine '{}':", name),
            Message::NoRoutinesFound => "No routines saved yet.".to_string(),

            // === BACKUP MESSAGES ===
            Message::BackupExported(path) => format!("Backup written to {}", path),
            Message::ExportFailed(error) => format!("Export failed: {}", error),
            Message::BackupImported {
                exercises,
                workouts,
                sets,
                routines,
            } => format!(
                "Imported {} exercises, {} workouts, {} sets and {} routines",
                exercises, workouts, sets, routines
            ),
            Message::ImportFailed(error) => format!("Invalid backup file: {}", error),
            Message::ImportCancelled => "Import cancelled, nothing changed.".to_string(),
            Message::PromptBackupPath => "Backup file to restore (leave empty to cancel)".to_string(),
            Message::ConfirmImport => "Importing replaces ALL current data. Continue?".to_string(),
            Message::ConfirmClear => "Delete ALL workouts, sets, exercises and routines?".to_string(),
            Message::DataCleared => "All data cleared, standard exercises restored".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled.".to_string(),
        };
        write!(f, "{}", s)
    }
}
