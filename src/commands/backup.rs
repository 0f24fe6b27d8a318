//! Backup commands: export to JSON, restore from JSON, wipe.
//!
//! Import and clear are destructive and ask for confirmation unless
//! `--yes` is passed. A rejected backup file is reported and leaves the
//! current data untouched.

use super::confirmed;
use crate::{
    db::db::Db,
    libs::{
        backup::{Backup, BackupPicker, FilePicker, FileShare},
        config::Config,
        messages::Message,
    },
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    #[command(subcommand)]
    command: BackupCommand,
}

#[derive(Debug, Subcommand)]
enum BackupCommand {
    /// Write every exercise, workout, set and routine to a JSON file
    Export {
        /// Output file; defaults to the configured backup location
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all data with the contents of a backup file
    Import {
        /// Backup file; prompts for one when omitted
        file: Option<PathBuf>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all data and restore the standard exercises
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Asks for a path on the terminal; an empty answer cancels.
struct PromptPicker;

impl BackupPicker for PromptPicker {
    fn pick(&self) -> Result<Option<String>> {
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBackupPath.to_string())
            .allow_empty(true)
            .interact_text()?;

        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }
}

pub fn cmd(db: &Db, args: BackupArgs) -> Result<()> {
    let backup = Backup::new(db);

    match args.command {
        BackupCommand::Export { output } => {
            let path = match output {
                Some(path) => path,
                None => Config::read()?.backup_path()?,
            };
            match backup.export(&FileShare, &path) {
                Ok(()) => {
                    msg_success!(Message::BackupExported(path.display().to_string()));
                }
                Err(e) => {
                    msg_error!(Message::ExportFailed(e.to_string()));
                }
            }
        }
        BackupCommand::Import { file, yes } => {
            if !confirmed(yes, Message::ConfirmImport)? {
                msg_info!(Message::ImportCancelled);
                return Ok(());
            }

            let result = match file {
                Some(path) => backup.import(&FilePicker::new(path)),
                None => backup.import(&PromptPicker),
            };
            match result {
                Ok(Some(summary)) => {
                    msg_success!(Message::BackupImported {
                        exercises: summary.exercises,
                        workouts: summary.workouts,
                        sets: summary.sets,
                        routines: summary.routines,
                    });
                }
                Ok(None) => {
                    msg_info!(Message::ImportCancelled);
                }
                Err(e) => {
                    msg_error!(Message::ImportFailed(e.to_string()));
                }
            }
        }
        BackupCommand::Clear { yes } => {
            if !confirmed(yes, Message::ConfirmClear)? {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            backup.clear()?;
            msg_success!(Message::DataCleared);
        }
    }

    Ok(())
}
