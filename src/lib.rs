//! # Ironvault - a local workout log
//!
//! Records training sessions, the sets performed in them and the exercise
//! catalogue they draw from, all in one SQLite file.
//!
//! ## Features
//!
//! - **Sessions**: start or resume today's workout, log past days, discard
//!   abandoned sessions
//! - **Statistics**: volume per workout, personal bests, progression with an
//!   estimated one-rep max
//! - **Routines**: capture a workout's exercise order and replay it as
//!   placeholder sets
//! - **Backups**: JSON export, validated all-or-nothing import, full wipe
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ironvault::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
