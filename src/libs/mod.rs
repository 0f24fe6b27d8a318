//! Cross-cutting pieces shared by the data layer and the CLI.
//!
//! - [`backup`]: JSON export, validated import and wipe of the whole store
//! - [`config`] and [`data_storage`]: where the database and backups live
//! - [`error`]: typed failures carried inside `anyhow::Error`
//! - [`messages`]: user-facing text and the output macros
//! - [`view`]: terminal tables

pub mod backup;
pub mod body_part;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod view;
