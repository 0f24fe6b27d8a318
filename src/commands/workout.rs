use super::{confirmed, or_empty};
use crate::{
    db::{
        db::Db,
        sets::Sets,
        stats::Stats,
        workouts::{session_date, Finish, Workouts},
    },
    libs::{error::VaultError, messages::Message, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Log a session on another day (YYYY-MM-DD) instead of today
    #[arg(short, long)]
    date: Option<String>,

    /// Note for the session; always starts a new workout
    #[arg(short, long)]
    note: Option<String>,
}

#[derive(Debug, Args)]
pub struct WorkoutArgs {
    /// Workout id
    workout: i64,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Workout id
    workout: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn start(db: &Db, args: StartArgs) -> Result<()> {
    let workouts = Workouts::new(db);
    let note = args.note.as_deref();

    // Validate before anything is written.
    let day = args.date.as_deref().map(session_date).transpose()?;

    let workout = match (day, note) {
        (Some(day), _) => workouts.create_on(day, note)?,
        (None, Some(_)) => workouts.create(note, None)?,
        (None, None) => {
            let (workout, created) = workouts.resume_or_start(Local::now())?;
            if !created {
                msg_info!(Message::WorkoutResumed(workout.id, workout.day_label()));
                return Ok(());
            }
            workout
        }
    };

    msg_success!(Message::WorkoutStarted(workout.id, workout.day_label()));
    Ok(())
}

pub fn finish(db: &Db, args: WorkoutArgs) -> Result<()> {
    match Workouts::new(db).finish(args.workout)? {
        Finish::Kept { sets } => {
            msg_success!(Message::WorkoutKept(args.workout, sets));
        }
        Finish::Discarded => {
            msg_info!(Message::WorkoutDiscarded(args.workout));
        }
    }
    Ok(())
}

pub fn history(db: &Db) -> Result<()> {
    let cleaned = or_empty(Workouts::new(db).cleanup_empty());
    if cleaned > 0 {
        msg_info!(Message::EmptyWorkoutsCleaned(cleaned));
    }

    let summaries = or_empty(Stats::new(db).workout_summaries());
    if summaries.is_empty() {
        msg_info!(Message::NoWorkoutsFound);
        return Ok(());
    }

    msg_print!(Message::WorkoutHistoryHeader, true);
    View::workouts(&summaries)?;
    Ok(())
}

pub fn show(db: &Db, args: WorkoutArgs) -> Result<()> {
    let Some(workout) = Workouts::new(db).get(args.workout)? else {
        msg_error!(VaultError::not_found("workout", args.workout));
        return Ok(());
    };

    let sets = or_empty(Sets::new(db).for_workout(workout.id));
    if sets.is_empty() {
        msg_info!(Message::NoSetsLogged(workout.id));
        return Ok(());
    }

    msg_print!(Message::WorkoutSetsHeader(workout.id, workout.day_label()), true);
    View::sets(&sets)?;
    Ok(())
}

pub fn delete(db: &Db, args: DeleteArgs) -> Result<()> {
    if !confirmed(args.yes, Message::ConfirmDeleteWorkout(args.workout))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    Workouts::new(db).delete(args.workout)?;
    msg_success!(Message::WorkoutDeleted(args.workout));
    Ok(())
}
