//! `guestbook gifts` - print the sticker catalog

use anyhow::{Context, Result};
use clap::Parser;
use guestbook_core::gift;

use super::OutputFormat;

/// Arguments for the gifts command
#[derive(Parser, Debug)]
pub struct GiftsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run_gifts(args: GiftsArgs) -> Result<()> {
    let entries = gift::catalog();

    match args.format {
        OutputFormat::Json => {
            let mut gifts = serde_json::Map::new();
            for e in &entries {
                let value = serde_json::to_value(e.gift).context("Failed to serialize gift")?;
                gifts.insert(e.key.to_string(), value);
            }
            println!("{}", serde_json::to_string_pretty(&gifts)?);
        }
        OutputFormat::Text => {
            for e in &entries {
                println!("{}  {:<8} {}  {}", e.key, e.gift.name, e.gift.border_color, e.gift.img_url);
            }
        }
    }
    Ok(())
}
