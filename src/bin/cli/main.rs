mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nihon-cli", about = "Japanese kana and kanji trainer", version)]
struct Cli {
    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Type the reading of each character
    Quiz {
        /// Category (hiragana, katakana, kanji, numbers, words, sentences, listening)
        category: String,
        /// Stop after this many questions
        #[arg(long)]
        rounds: Option<usize>,
    },

    /// Judge whether the reading shown on a card is right
    Flashcards {
        /// Category to practice
        category: String,
        /// Stop after this many cards
        #[arg(long)]
        rounds: Option<usize>,
    },

    /// Show level, XP and unlocked tiers
    Status,

    /// Show answer statistics
    Stats {
        /// Restrict to the unlocked pool of one category
        #[arg(long)]
        category: Option<String>,
        /// Maximum characters per ranking
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// List achievements
    Achievements,

    /// Show categories, or the tiers of one category
    Catalog {
        /// Category name
        category: Option<String>,
    },

    /// Search the dictionary
    Lookup {
        /// Kanji, reading or English gloss
        query: String,
        /// Maximum results
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Delete all progress and player state
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.config.as_deref())?;

    match cli.command {
        Command::Quiz { category, rounds } => {
            commands::quiz::run(&app, &category, rounds, &cli.format, use_color)?;
        }
        Command::Flashcards { category, rounds } => {
            commands::flashcards::run(&app, &category, rounds, &cli.format, use_color)?;
        }
        Command::Status => {
            commands::status::run(&app, &cli.format, use_color)?;
        }
        Command::Stats { category, limit } => {
            commands::stats::run(&app, category.as_deref(), limit, &cli.format, use_color)?;
        }
        Command::Achievements => {
            commands::achievements::run(&app, &cli.format, use_color)?;
        }
        Command::Catalog { category } => {
            commands::catalog::run(&app, category.as_deref(), &cli.format, use_color)?;
        }
        Command::Lookup { query, limit } => {
            commands::lookup::run(&app, &query, limit, &cli.format, use_color)?;
        }
        Command::Reset { yes } => {
            commands::reset::run(&app, yes, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

/// Check if stdin is a terminal (not piped)
pub fn stdin_is_tty() -> bool {
    unsafe { libc_isatty(0) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
