use crate::db::exercises::Exercise;
use crate::db::routines::{Routine, RoutineEntry};
use crate::db::sets::SetWithExercise;
use crate::db::stats::{PersonalBest, ProgressPoint, WorkoutSummary};
use crate::db::workouts::day_label;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn workouts(summaries: &[WorkoutSummary]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "VOLUME", "EXERCISES", "BODY PARTS", "NOTE"]);
        for summary in summaries {
            table.add_row(row![
                summary.workout.id,
                summary.workout.day_label(),
                summary.total_volume.map(Self::kg).unwrap_or_else(|| "-".to_string()),
                summary.exercise_names.join(", "),
                summary.body_parts.join(", "),
                summary.workout.note.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn sets(sets: &[SetWithExercise]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "EXERCISE", "WEIGHT", "REPS", "VOLUME"]);
        for entry in sets {
            let set = &entry.set;
            if set.is_placeholder() {
                table.add_row(row![set.id, entry.exercise_name, "-", "-", "-"]);
            } else {
                table.add_row(row![set.id, entry.exercise_name, Self::kg(set.weight_kg), set.reps, Self::kg(set.volume())]);
            }
        }
        table.printstd();

        Ok(())
    }

    pub fn exercises(exercises: &[Exercise]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "BODY PART"]);
        for exercise in exercises {
            table.add_row(row![exercise.id, exercise.name, exercise.target_body_part.as_deref().unwrap_or("")]);
        }
        table.printstd();

        Ok(())
    }

    pub fn personal_bests(bests: &[PersonalBest]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["EXERCISE", "MAX WEIGHT", "REPS"]);
        for best in bests {
            table.add_row(row![best.exercise_name, Self::kg(best.max_weight), best.best_reps]);
        }
        table.printstd();

        Ok(())
    }

    pub fn progress(points: &[ProgressPoint]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "MAX WEIGHT", "REPS", "EST. 1RM"]);
        for point in points {
            table.add_row(row![
                day_label(&point.date),
                Self::kg(point.max_weight),
                point.reps,
                Self::kg(point.one_rep_max)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn routines(routines: &[Routine]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME"]);
        for routine in routines {
            table.add_row(row![routine.id, routine.name]);
        }
        table.printstd();

        Ok(())
    }

    pub fn routine_entries(entries: &[RoutineEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "EXERCISE"]);
        for entry in entries {
            table.add_row(row![
                entry.routine_exercise.sort_order + 1,
                entry.exercise_name.as_deref().unwrap_or("(deleted)")
            ]);
        }
        table.printstd();

        Ok(())
    }

    fn kg(value: f64) -> String {
        format!("{} kg", value)
    }
}
