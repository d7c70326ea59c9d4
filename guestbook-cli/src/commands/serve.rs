//! HTTP server command
//!
//! Runs the guestbook API against Firebase, or against an in-memory store
//! for local development.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use guestbook_core::Database;
use guestbook_server::{run_server, ServerConfig};

use super::connect;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep posts in memory instead of Firebase (lost on exit)
    #[arg(long, conflicts_with = "database_url")]
    pub in_memory: bool,

    /// Database URL (overrides FIREBASE_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db = if args.in_memory {
        tracing::warn!("Using in-memory store; posts are lost on exit");
        Database::in_memory()
    } else {
        connect(args.database_url)?
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(db, config).await.context("Server error")?;
    Ok(())
}
