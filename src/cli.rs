//! CLI definitions for Inspect AX.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inspect AX CLI.
#[derive(Parser)]
#[command(name = "inspect-ax")]
#[command(about = "Right-click accessibility inspector for captured pages")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (optional)
    #[arg(short, long, default_value = "inspect-ax.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Right-click an element, choose "Inspect AX" and print the overlay
    Inspect(InspectArgs),

    /// Print the role and name of an element directly
    Snapshot {
        /// Page fixture (JSON)
        #[arg(long)]
        page: PathBuf,

        /// CSS selector of the element
        #[arg(long)]
        target: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a descriptor against a page and print what it finds
    Locate {
        /// Page fixture (JSON)
        #[arg(long)]
        page: PathBuf,

        /// CSS selector stage
        #[arg(long)]
        selector: Option<String>,

        /// XPath stage
        #[arg(long)]
        xpath: Option<String>,

        /// Pointer x for the point stage
        #[arg(long, requires = "y", allow_negative_numbers = true)]
        x: Option<i64>,

        /// Pointer y for the point stage
        #[arg(long, requires = "x", allow_negative_numbers = true)]
        y: Option<i64>,
    },
}

#[derive(Args)]
pub(crate) struct InspectArgs {
    /// Page fixture (JSON)
    #[arg(long)]
    pub page: PathBuf,

    /// CSS selector of the element to right-click
    #[arg(long)]
    pub target: String,

    /// Tab id
    #[arg(long, default_value_t = 1)]
    pub tab: i64,

    /// Frame the page is loaded in (0 is the top frame)
    #[arg(long, default_value_t = 0)]
    pub frame: u32,

    /// Wait between the right-click and the menu click
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Print the inspection result as JSON
    #[arg(long)]
    pub json: bool,
}
