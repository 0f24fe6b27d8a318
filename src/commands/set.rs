use super::exercise;
use crate::{
    db::{db::Db, sets::Sets},
    libs::messages::Message,
    msg_error, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Workout id
    workout: i64,

    /// Exercise id or exact name
    exercise: String,

    /// Weight in kilograms
    weight: f64,

    reps: i64,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[command(subcommand)]
    command: SetCommand,
}

#[derive(Debug, Subcommand)]
enum SetCommand {
    /// Change the weight and reps of a set
    Edit {
        /// Set id
        id: i64,
        /// Weight in kilograms
        weight: f64,
        reps: i64,
    },
    /// Remove a set
    Delete {
        /// Set id
        id: i64,
    },
}

pub fn log(db: &Db, args: LogArgs) -> Result<()> {
    let Some(found) = exercise::resolve(db, &args.exercise)? else {
        msg_error!(Message::ExerciseNotFound(args.exercise));
        return Ok(());
    };

    let id = Sets::new(db).add(args.workout, found.id, args.weight, args.reps)?;
    msg_success!(Message::SetLogged(id, args.weight, args.reps));
    Ok(())
}

pub fn cmd(db: &Db, args: SetArgs) -> Result<()> {
    let sets = Sets::new(db);

    match args.command {
        SetCommand::Edit { id, weight, reps } => {
            sets.update(id, weight, reps)?;
            msg_success!(Message::SetUpdated(id));
        }
        SetCommand::Delete { id } => {
            sets.delete(id)?;
            msg_success!(Message::SetDeleted(id));
        }
    }

    Ok(())
}
