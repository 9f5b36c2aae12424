// Command-line interface

pub mod commands;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "feed-image")]
#[command(about = "Pick representative images for feed entries from their HTML content", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign images to the entries of a feed file and print them as JSON
    Process {
        /// RSS or Atom file to read ("-" for stdin)
        feed: PathBuf,

        /// YAML image configuration
        #[arg(short, long, env = "IMAGE_CONFIG_PATH")]
        config: Option<PathBuf>,

        /// Extra ignore pattern (repeatable)
        #[arg(short, long = "ignore")]
        ignore: Vec<String>,

        /// Replace images the feed already declares (true/false, overrides OVERRIDE_IMAGE)
        #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
        override_image: Option<bool>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the image candidates found in an HTML file
    Extract {
        /// HTML file to scan ("-" for stdin)
        html: PathBuf,
    },

    /// Load and validate an image configuration file
    Validate {
        /// YAML image configuration
        config: PathBuf,
    },
}
