//! Command implementations

pub mod gifts;
pub mod posts;
pub mod serve;

pub use gifts::{run_gifts, GiftsArgs};
pub use posts::{run_list, run_post, ListArgs, PostArgs};
pub use serve::{run_serve, ServeArgs};

use anyhow::{Context, Result};
use clap::ValueEnum;
use guestbook_core::{config, Database, FirebaseConfig};

/// Output format for listing commands
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

/// Build the database handle from the environment.
///
/// `database_url` replaces `FIREBASE_DATABASE_URL` when given.
pub fn connect(database_url: Option<String>) -> Result<Database> {
    let firebase = FirebaseConfig::from_lookup(|key| match &database_url {
        Some(url) if key == config::DATABASE_URL => Some(url.clone()),
        _ => std::env::var(key).ok(),
    })
    .context("Firebase configuration incomplete. Set FIREBASE_* variables or ~/.guestbook/.env")?;

    Database::connect(&firebase).context("Failed to create database handle")
}
