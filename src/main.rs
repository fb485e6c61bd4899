use anyhow::Result;
use archmap::builders::AnalysisStage;
use archmap::cli::{Cli, Commands};
use archmap::commands::{self, AnalyzeConfig};
use clap::Parser;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();
    archmap::observability::init_tracing(cli.verbosity);

    match cli.command {
        Commands::Coupling { input } => {
            commands::handle_analyze(AnalyzeConfig::from_input(input, AnalysisStage::Coupling, None))
        }
        Commands::Dendrogram { input } => commands::handle_analyze(AnalyzeConfig::from_input(
            input,
            AnalysisStage::Dendrogram,
            None,
        )),
        Commands::Modules { input, threshold } => commands::handle_analyze(
            AnalyzeConfig::from_input(input, AnalysisStage::Modules, threshold),
        ),
        Commands::Init { force } => commands::init_config(force),
    }
}
