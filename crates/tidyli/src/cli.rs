use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tidyli_core::{Category, Decision};

#[derive(Parser)]
#[command(name = "tidyli")]
#[command(version)]
#[command(about = "Review LinkedIn connections and decide who to keep")]
pub struct Cli {
    /// Directory holding profiles.csv, pictures.csv and messages.csv
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// State directory for config and decisions (defaults to ~/.tidyli)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Review profiles one card at a time
    Review {
        /// Category to start in: all, keep, remove or pending
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// List the profiles in a category
    List {
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Record a decision for one profile URL
    Decide {
        url: String,
        /// keep, remove or pending
        decision: Decision,
    },

    /// Show keep/remove/pending counts
    Stats,

    /// Write the URL list for a category
    Export {
        #[arg(short, long)]
        category: Option<Category>,

        /// Output directory (defaults to export_dir from config)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Run the decision-log server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,

        #[arg(long)]
        bind: Option<String>,
    },

    /// Print version information
    Version,
}
