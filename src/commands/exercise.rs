use super::or_empty;
use crate::{
    db::{
        db::Db,
        exercises::{Exercise, Exercises},
    },
    libs::{body_part::BodyPart, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ExercisesArgs {
    /// Only show exercises for this body part
    #[arg(short, long, value_enum)]
    body_part: Option<BodyPart>,

    /// Case-insensitive part of the exercise name
    #[arg(short, long)]
    search: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExerciseArgs {
    #[command(subcommand)]
    command: ExerciseCommand,
}

#[derive(Debug, Subcommand)]
enum ExerciseCommand {
    /// Add a custom exercise to the catalogue
    Add {
        /// Exercise name
        name: String,

        /// Body part it trains
        #[arg(short, long, value_enum)]
        body_part: Option<BodyPart>,
    },
}

pub fn list(db: &Db, args: ExercisesArgs) -> Result<()> {
    let exercises = or_empty(Exercises::new(db).filter(args.body_part, args.search.as_deref()));
    if exercises.is_empty() {
        msg_info!(Message::NoExercisesFound);
        return Ok(());
    }

    msg_print!(Message::ExercisesHeader, true);
    View::exercises(&exercises)?;
    Ok(())
}

pub fn cmd(db: &Db, args: ExerciseArgs) -> Result<()> {
    match args.command {
        ExerciseCommand::Add { name, body_part } => {
            let id = Exercises::new(db).add(&name, body_part)?;
            msg_success!(Message::ExerciseAdded(name.trim().to_string(), id));
            Ok(())
        }
    }
}

/// Looks an exercise up by id when the argument is numeric, by exact name otherwise.
pub(crate) fn resolve(db: &Db, exercise: &str) -> Result<Option<Exercise>> {
    let exercises = Exercises::new(db);
    match exercise.trim().parse::<i64>() {
        Ok(id) => exercises.get(id),
        Err(_) => exercises.find_by_name(exercise.trim()),
    }
}
