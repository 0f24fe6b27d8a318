use super::{confirmed, or_empty};
use crate::{
    db::{db::Db, routines::Routines, workouts::Workouts},
    libs::{error::VaultError, messages::Message, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct RoutineArgs {
    #[command(subcommand)]
    command: RoutineCommand,
}

#[derive(Debug, Subcommand)]
enum RoutineCommand {
    /// Save the exercises of a workout as a routine
    Save {
        /// Workout to copy the exercise order from
        workout: i64,
        /// Routine name
        name: String,
    },
    /// Add a routine's exercises to a workout as empty sets
    Apply {
        /// Routine id
        routine: i64,
        /// Target workout; defaults to today's workout
        workout: Option<i64>,
    },
    /// List saved routines
    List,
    /// Show the exercises of a routine
    Show {
        /// Routine id
        routine: i64,
    },
    /// Delete a routine
    Delete {
        /// Routine id
        routine: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(db: &Db, args: RoutineArgs) -> Result<()> {
    let routines = Routines::new(db);

    match args.command {
        RoutineCommand::Save { workout, name } => {
            let routine = routines.create_from_workout(workout, &name)?;
            let count = routines.exercises(routine.id)?.len();
            msg_success!(Message::RoutineSaved(routine.name, count));
        }
        RoutineCommand::Apply { routine, workout } => {
            let Some(found) = routines.get(routine)? else {
                msg_error!(VaultError::not_found("routine", routine));
                return Ok(());
            };
            let workout_id = match workout {
                Some(id) => id,
                None => Workouts::new(db).resume_or_start(Local::now())?.0.id,
            };
            let placeholders = routines.apply_to_workout(found.id, workout_id)?;
            msg_success!(Message::RoutineApplied(found.name, placeholders.len(), workout_id));
        }
        RoutineCommand::List => {
            let all = or_empty(routines.list());
            if all.is_empty() {
                msg_info!(Message::NoRoutinesFound);
                return Ok(());
            }
            msg_print!(Message::RoutinesHeader, true);
            View::routines(&all)?;
        }
        RoutineCommand::Show { routine } => {
            let Some(found) = routines.get(routine)? else {
                msg_error!(VaultError::not_found("routine", routine));
                return Ok(());
            };
            let entries = or_empty(routines.exercises(found.id));
            msg_print!(Message::RoutineHeader(found.name), true);
            View::routine_entries(&entries)?;
        }
        RoutineCommand::Delete { routine, yes } => {
            let Some(found) = routines.get(routine)? else {
                msg_error!(VaultError::not_found("routine", routine));
                return Ok(());
            };
            if !confirmed(yes, Message::ConfirmDeleteRoutine(found.name.clone()))? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            routines.delete(found.id)?;
            msg_success!(Message::RoutineDeleted(found.name));
        }
    }

    Ok(())
}
