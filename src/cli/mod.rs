pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "skimmer")]
#[command(about = "Extract readable articles, images and links from web pages", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/skimmer/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a page in a hidden browser tab and extract it
    Extract {
        /// URL of the page to extract
        url: String,

        /// Pretty-print the JSON reply
        #[arg(long)]
        pretty: bool,
    },
    /// Serve page messages as JSON lines on stdin/stdout
    Bridge,
    /// Run the extraction pipeline on a saved HTML file
    Parse {
        /// Path to the HTML file
        path: PathBuf,

        /// URL the page was saved from
        #[arg(short, long)]
        url: String,

        /// Pretty-print the JSON reply
        #[arg(long)]
        pretty: bool,
    },
}
