//! Application configuration.
//!
//! Stored as pretty-printed JSON (`config.json`) in the data directory.
//! Every field is optional; a missing file or field falls back to the
//! data directory defaults.
//!
//! ```rust,no_run
//! use ironvault::libs::config::Config;
//!
//! let config = Config::read()?;
//! let db_path = config.database_path()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "ironvault.db";
pub const BACKUP_FILE_NAME: &str = "ironvault_backup.json";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// SQLite file to use instead of `<data dir>/ironvault.db`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Directory that receives exported backups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

impl Config {
    pub fn read() -> Result<Config> {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&path)
    }

    /// Reads a config file, returning the default config when it does not exist.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    pub fn backup_path(&self) -> Result<PathBuf> {
        match &self.backup_dir {
            Some(dir) => Ok(dir.join(BACKUP_FILE_NAME)),
            None => DataStorage::new().get_path(BACKUP_FILE_NAME),
        }
    }
}
