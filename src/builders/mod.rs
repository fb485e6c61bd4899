pub mod architecture_analysis;

pub use architecture_analysis::{
    perform_architecture_analysis, sweep_thresholds, validate_thresholds, AnalysisStage,
    ArchitectureOptions, ArchitectureReport, CallGraphStats,
};
