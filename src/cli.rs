use crate::io::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "archmap")]
#[command(about = "Recover modules from a call graph by clustering class coupling", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    /// -v: info, -vv: debug, -vvv: trace. ARCHMAP_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,
}

/// Arguments shared by every command that reads a call graph
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Call graph JSON file: {"Class.method": ["Other.method", ...]}
    pub call_graph: PathBuf,

    /// Configuration file (defaults to the nearest .archmap.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Separator between class and method in identifiers
    #[arg(long)]
    pub separator: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and print the class coupling graph
    Coupling {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Build and print the clustering dendrogram
    Dendrogram {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Extract modules at one or more cohesion thresholds
    Modules {
        #[command(flatten)]
        input: InputArgs,

        /// Cohesion threshold(s), comma-separated for a sweep
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        threshold: Option<Vec<f64>>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
