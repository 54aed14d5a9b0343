//! Depplan CLI - Command-line interface for Depplan
//!
//! Loads a plan file (dependency pairs plus standalone items) and prints
//! per-tree plans, structural queries, statistics, or a rendered snapshot.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "depplan")]
#[command(author = "Depplan Contributors")]
#[command(version)]
#[command(about = "Dependency plans for named work items", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute one plan record per dependency tree
    Plan {
        /// Plan file (JSON with "edges" and optional "nodes")
        file: PathBuf,

        /// Also show the execution layers of each tree
        #[arg(long)]
        levels: bool,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Run a structural query against one item
    Query {
        /// Plan file
        file: PathBuf,

        /// The query to run
        #[arg(value_enum)]
        op: QueryOp,

        /// The item to query
        node: String,

        /// Second item, for has-successor / has-predecessor
        candidate: Option<String>,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show graph statistics
    Status {
        /// Plan file
        file: PathBuf,
    },

    /// Render a snapshot of the graph
    Export {
        /// Plan file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "dot")]
        format: ExportFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Structural queries exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QueryOp {
    Successors,
    Predecessors,
    SuccessorsOfSuccessors,
    PredecessorsOfPredecessors,
    HasSuccessor,
    HasPredecessor,
    Degree,
    InDegree,
    OutDegree,
    Neighbors,
    Connected,
    Root,
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Dot,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Plan { file, levels, json } => commands::plan(&file, levels, json),
        Commands::Query {
            file,
            op,
            node,
            candidate,
            json,
        } => commands::query(&file, op, &node, candidate.as_deref(), json),
        Commands::Status { file } => commands::status(&file),
        Commands::Export {
            file,
            format,
            output,
        } => commands::export(&file, format, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
