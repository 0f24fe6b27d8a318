use super::{exercise, or_empty};
use crate::{
    db::{db::Db, stats::Stats, workouts::day_label},
    libs::{messages::Message, view::View},
    msg_error, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ExerciseArgs {
    /// Exercise id or exact name
    exercise: String,
}

pub fn last(db: &Db, args: ExerciseArgs) -> Result<()> {
    let Some(found) = exercise::resolve(db, &args.exercise)? else {
        msg_error!(Message::ExerciseNotFound(args.exercise));
        return Ok(());
    };

    match or_empty(Stats::new(db).last_set_for_exercise(found.id)) {
        Some(last) => {
            msg_info!(Message::LastSet(found.name, last.set.weight_kg, last.set.reps, day_label(&last.date)));
        }
        None => {
            msg_info!(Message::NoPreviousSet(found.name));
        }
    }
    Ok(())
}

pub fn records(db: &Db) -> Result<()> {
    let bests = or_empty(Stats::new(db).personal_bests());
    if bests.is_empty() {
        msg_info!(Message::NoPersonalBests);
        return Ok(());
    }

    msg_print!(Message::PersonalBestsHeader, true);
    View::personal_bests(&bests)?;
    Ok(())
}

pub fn progress(db: &Db, args: ExerciseArgs) -> Result<()> {
    let Some(found) = exercise::resolve(db, &args.exercise)? else {
        msg_error!(Message::ExerciseNotFound(args.exercise));
        return Ok(());
    };

    let points = or_empty(Stats::new(db).exercise_progress(found.id));
    // A single point is not a trend.
    if points.len() < 2 {
        msg_info!(Message::NotEnoughProgressData);
        return Ok(());
    }

    msg_print!(Message::ProgressHeader(found.name), true);
    View::progress(&points)?;
    Ok(())
}
