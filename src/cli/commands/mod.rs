//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `queue_file`: loading and saving JSON queue files
//! - `view`: rendering the grouped view and applying drags/removals
//! - `settings`: showing and editing the config file

mod queue_file;
mod settings;
mod view;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use settings::cmd_config;
pub use view::{cmd_drag, cmd_remove, cmd_view};

/// Queue Minder CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shaping how the queue view is built
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Fold album runs into single rows (defaults to the config setting)
    #[arg(long, conflicts_with = "no_collapse")]
    pub collapse: bool,
    /// Show every track on its own row
    #[arg(long)]
    pub no_collapse: bool,
    /// Filter rows by artist, album or title
    #[arg(short, long)]
    pub filter: Option<String>,
    /// Expand the album whose first track has this id
    #[arg(long)]
    pub expand: Option<u32>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the grouped view of a queue file
    View {
        /// Path to the JSON queue file
        queue: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Drag a view row to another position
    Drag {
        /// Path to the JSON queue file
        queue: PathBuf,
        /// View row to move
        from: usize,
        /// View row to drop it on
        to: usize,
        #[command(flatten)]
        view: ViewArgs,
        /// Save the reordered queue back to the file
        #[arg(long)]
        write: bool,
    },
    /// Remove view rows, or keep only them with --crop
    Remove {
        /// Path to the JSON queue file
        queue: PathBuf,
        /// View rows to act on
        #[arg(long, value_delimiter = ',', required = true)]
        rows: Vec<usize>,
        /// Remove every row except the listed ones
        #[arg(long)]
        crop: bool,
        #[command(flatten)]
        view: ViewArgs,
        /// Save the edited queue back to the file
        #[arg(long)]
        write: bool,
    },
    /// Show or change the saved view settings
    Config {
        /// Fold album runs by default
        #[arg(long)]
        collapse_albums: Option<bool>,
        /// Rows of context above the now-playing row
        #[arg(long)]
        context_rows: Option<usize>,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::View { queue, view, json } => cmd_view(&rt, queue, view, *json),
        Commands::Drag {
            queue,
            from,
            to,
            view,
            write,
        } => cmd_drag(&rt, queue, *from, *to, view, *write),
        Commands::Remove {
            queue,
            rows,
            crop,
            view,
            write,
        } => cmd_remove(&rt, queue, rows, *crop, view, *write),
        Commands::Config {
            collapse_albums,
            context_rows,
        } => cmd_config(*collapse_albums, *context_rows),
    }
}
