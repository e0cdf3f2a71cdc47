pub mod browse;
pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tributary")]
#[command(about = "Browse an RSS/Atom feed through fallback proxies", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/tributary/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Favorites database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of a feed
    Show {
        /// URL of the feed
        url: String,

        /// Page to print (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Only entries whose title or summary contains this text
        #[arg(short, long, conflicts_with = "favorites")]
        search: Option<String>,

        /// Only favorite entries
        #[arg(short, long)]
        favorites: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Browse a feed interactively
    Browse {
        /// URL of the feed
        url: String,
    },
    /// List favorite links
    Favorites,
    /// Star or unstar a link
    Toggle {
        /// Entry link
        link: String,
    },
}
