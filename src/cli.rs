//! CLI definitions for the element inspector.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Element inspector CLI.
#[derive(Parser)]
#[command(name = "element-inspector")]
#[command(about = "Select a page element and capture everything about it")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Arm inspect mode on a page fixture, click, and show what the viewer receives
    Inspect {
        /// Page fixture (JSON)
        #[arg(long)]
        page: PathBuf,

        /// Viewport x coordinate of the click
        #[arg(long)]
        x: f64,

        /// Viewport y coordinate of the click
        #[arg(long)]
        y: f64,

        /// Right-click instead of a primary click
        #[arg(long)]
        right_click: bool,

        /// Export the snapshot as JSON (defaults to the configured directory)
        #[arg(long)]
        export: Option<Option<PathBuf>>,
    },

    /// Capture one element by id and print the snapshot JSON
    Capture {
        /// Page fixture (JSON)
        #[arg(long)]
        page: PathBuf,

        /// Element id
        #[arg(long)]
        id: String,
    },
}
