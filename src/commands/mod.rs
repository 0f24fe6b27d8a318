pub mod backup;
pub mod exercise;
pub mod routine;
pub mod set;
pub mod stats;
pub mod workout;

use crate::{
    db::db::Db,
    libs::{config::Config, messages::Message},
    msg_error,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Start a workout, or resume today's")]
    Start(workout::StartArgs),
    #[command(about = "Close a workout, discarding it if nothing was logged")]
    Finish(workout::WorkoutArgs),
    #[command(about = "List past workouts with volume and exercises")]
    History,
    #[command(about = "Show the sets of a workout")]
    Show(workout::WorkoutArgs),
    #[command(about = "Delete a workout and its sets")]
    Delete(workout::DeleteArgs),
    #[command(about = "Log a set", arg_required_else_help = true)]
    Log(set::LogArgs),
    #[command(about = "Edit or delete a logged set")]
    Set(set::SetArgs),
    #[command(about = "Browse the exercise catalogue")]
    Exercises(exercise::ExercisesArgs),
    #[command(about = "Manage exercises")]
    Exercise(exercise::ExerciseArgs),
    #[command(about = "Show the last set done for an exercise")]
    Last(stats::ExerciseArgs),
    #[command(about = "Show personal bests")]
    Records,
    #[command(about = "Show progression and estimated 1RM for an exercise")]
    Progress(stats::ExerciseArgs),
    #[command(about = "Save, apply and manage routines")]
    Routine(routine::RoutineArgs),
    #[command(about = "Export, import or wipe all data")]
    Backup(backup::BackupArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let db = cli.open_db()?;

        match cli.command {
            Commands::Start(args) => workout::start(&db, args),
            Commands::Finish(args) => workout::finish(&db, args),
            Commands::History => workout::history(&db),
            Commands::Show(args) => workout::show(&db, args),
            Commands::Delete(args) => workout::delete(&db, args),
            Commands::Log(args) => set::log(&db, args),
            Commands::Set(args) => set::cmd(&db, args),
            Commands::Exercises(args) => exercise::list(&db, args),
            Commands::Exercise(args) => exercise::cmd(&db, args),
            Commands::Last(args) => stats::last(&db, args),
            Commands::Records => stats::records(&db),
            Commands::Progress(args) => stats::progress(&db, args),
            Commands::Routine(args) => routine::cmd(&db, args),
            Commands::Backup(args) => backup::cmd(&db, args),
        }
    }

    fn open_db(&self) -> Result<Db> {
        let path = match &self.db {
            Some(path) => path.clone(),
            None => Config::read()?.database_path()?,
        };
        Db::open(&path)
    }
}

/// Reports a failed read and falls back to the empty value, so views show
/// their empty state instead of aborting.
pub(crate) fn or_empty<T: Default>(result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        msg_error!(Message::QueryFailed(e.to_string()));
        T::default()
    })
}

/// Asks before a destructive step. `--yes` skips the prompt.
pub(crate) fn confirmed(yes: bool, prompt: Message) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?;
    Ok(answer)
}
