//! guestbook CLI - write and read guestbook posts
//!
//! - Write a post with a gift sticker (`post`)
//! - List posts newest first (`list`)
//! - Show the sticker catalog (`gifts`)
//! - Run the HTTP API (`serve`)

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "guestbook",
    author,
    version,
    about = "Guestbook posts with gift stickers, stored in a Firebase Realtime Database"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a new post and print its id
    Post(commands::PostArgs),
    /// List posts, newest first
    List(commands::ListArgs),
    /// Show the gift sticker catalog
    Gifts(commands::GiftsArgs),
    /// Run HTTP API server
    Serve(commands::ServeArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();
    guestbook_core::config::load_dotenv();

    match cli.command {
        Commands::Post(args) => commands::run_post(args).await?,
        Commands::List(args) => commands::run_list(args).await?,
        Commands::Gifts(args) => commands::run_gifts(args)?,
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Completions(args) => run_completions(args),
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
