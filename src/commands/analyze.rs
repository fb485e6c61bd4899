use crate::builders::{perform_architecture_analysis, AnalysisStage, ArchitectureOptions};
use crate::call_graph::{CallGraph, ClassNameExtractor};
use crate::cli::InputArgs;
use crate::config::{self, ArchmapConfig};
use crate::io::{create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub call_graph: PathBuf,
    pub config: Option<PathBuf>,
    pub separator: Option<String>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub plain: bool,
    pub stage: AnalysisStage,
    pub thresholds: Option<Vec<f64>>,
}

impl AnalyzeConfig {
    pub fn from_input(input: InputArgs, stage: AnalysisStage, thresholds: Option<Vec<f64>>) -> Self {
        Self {
            call_graph: input.call_graph,
            config: input.config,
            separator: input.separator,
            format: input.format,
            output: input.output,
            plain: input.plain,
            stage,
            thresholds,
        }
    }
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let file_config = config::load_config(config.config.as_deref())
        .context("Failed to load configuration")?;

    configure_output(&config, &file_config);
    let options = build_options(&config, &file_config)?;
    let format = resolve_format(config.format, &file_config);

    let call_graph = CallGraph::load(&config.call_graph)
        .with_context(|| format!("Failed to load call graph {}", config.call_graph.display()))?;
    tracing::info!(
        path = %config.call_graph.display(),
        callers = call_graph.len(),
        "Loaded call graph"
    );

    let report = perform_architecture_analysis(&call_graph, &options)?;

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            create_writer(format, &mut writer).write_report(&report)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            create_writer(format, &mut handle).write_report(&report)?;
        }
    }

    Ok(())
}

/// Merge CLI flags over the file configuration
pub fn build_options(config: &AnalyzeConfig, file_config: &ArchmapConfig) -> Result<ArchitectureOptions> {
    let separator = config
        .separator
        .clone()
        .unwrap_or_else(|| file_config.separator().to_string());
    let extractor = ClassNameExtractor::new(separator)?;

    let thresholds = config
        .thresholds
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| vec![file_config.threshold()]);

    Ok(ArchitectureOptions {
        extractor,
        stage: config.stage,
        thresholds,
    })
}

fn resolve_format(flag: Option<OutputFormat>, file_config: &ArchmapConfig) -> OutputFormat {
    flag.or_else(|| {
        file_config
            .default_format()
            .and_then(|f| f.parse::<OutputFormat>().ok())
    })
    .unwrap_or(OutputFormat::Terminal)
}

fn configure_output(config: &AnalyzeConfig, file_config: &ArchmapConfig) {
    if config.plain || config.output.is_some() {
        colored::control::set_override(false);
    } else if let Some(use_color) = file_config.use_color() {
        colored::control::set_override(use_color);
    }
}
