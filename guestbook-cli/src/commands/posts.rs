//! `guestbook post` and `guestbook list`

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use guestbook_core::{NewPost, Post, PostRepo};
use tracing::info;

use super::{connect, OutputFormat};

/// Arguments for the post command
#[derive(Parser, Debug)]
pub struct PostArgs {
    /// Display name of the poster (surrounding whitespace is trimmed)
    #[arg(long)]
    pub name: String,

    /// Message body (surrounding whitespace is trimmed)
    #[arg(long)]
    pub comment: String,

    /// Gift sticker key, see `guestbook gifts`
    #[arg(long = "gift", value_name = "KEY")]
    pub gift_id: String,

    /// Database URL (overrides FIREBASE_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Database URL (overrides FIREBASE_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Write a post and print its id
pub async fn run_post(args: PostArgs) -> Result<()> {
    // Reject a bad gift before asking for configuration
    let post = NewPost::new(&args.name, &args.comment, &args.gift_id)?;
    let db = connect(args.database_url)?;

    let id = PostRepo::new(&db)
        .create(&post)
        .await
        .context("Failed to write post")?;

    info!(%id, "post written");
    println!("{}", id);
    Ok(())
}

/// Print every post, newest first
pub async fn run_list(args: ListArgs) -> Result<()> {
    let db = connect(args.database_url)?;

    let page = PostRepo::new(&db)
        .get_posts()
        .await
        .context("Failed to read posts")?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&page).context("Failed to serialize posts")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for post in &page.data {
                println!("{}", format_post(post));
            }
            println!("{} post(s)", page.total);
        }
    }
    Ok(())
}

fn format_timestamp(created_at: Option<i64>) -> String {
    created_at
        .and_then(DateTime::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "pending".to_string())
}

fn format_post(post: &Post) -> String {
    format!(
        "[{}] {} ({})\n  {}",
        format_timestamp(post.created_at),
        post.name,
        post.gift.name,
        post.comment
    )
}
