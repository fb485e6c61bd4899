use crate::builders::ArchitectureReport;
use crate::clustering::ModulePartition;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "terminal" => Ok(Self::Terminal),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ArchitectureReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &ArchitectureReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &ArchitectureReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_coupling(report)?;
        if let Some(dendrogram) = &report.dendrogram {
            writeln!(self.writer, "## Dendrogram")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "```text")?;
            write!(self.writer, "{}", dendrogram.render())?;
            writeln!(self.writer, "```")?;
            writeln!(self.writer)?;
        }
        for partition in &report.partitions {
            self.write_partition(partition)?;
        }
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &ArchitectureReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Architecture Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Callers | {} |", report.call_graph.callers)?;
        writeln!(self.writer, "| Call relations | {} |", report.call_graph.relations)?;
        writeln!(self.writer, "| Classes | {} |", report.coupling_summary.class_count)?;
        writeln!(self.writer, "| Coupling edges | {} |", report.coupling_summary.edge_count)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_coupling(&mut self, report: &ArchitectureReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Coupling")?;
        writeln!(self.writer)?;
        if report.coupling.is_empty() {
            writeln!(self.writer, "_No cross-class calls._")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(self.writer, "| From | To | Weight |")?;
        writeln!(self.writer, "|------|----|--------|")?;
        for edge in report.coupling.edges() {
            writeln!(self.writer, "| {} | {} | {:.4} |", edge.from, edge.to, edge.weight)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_partition(&mut self, partition: &ModulePartition) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "## Modules (threshold {})",
            partition.threshold
        )?;
        writeln!(self.writer)?;
        for (index, module) in partition.modules.iter().enumerate() {
            let classes = module
                .classes()
                .iter()
                .map(|c| format!("`{}`", c))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.writer, "{}. {}", index + 1, classes)?;
        }
        if let Some(diagnostic) = &partition.diagnostic {
            writeln!(self.writer)?;
            writeln!(self.writer, "> **Note:** {}", diagnostic)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &ArchitectureReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_coupling(report)?;
        if let Some(dendrogram) = &report.dendrogram {
            self.write_section("DENDROGRAM")?;
            write!(self.writer, "{}", dendrogram.render())?;
            writeln!(self.writer)?;
        }
        for partition in &report.partitions {
            self.write_partition(partition)?;
        }
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_section(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", title.bold())?;
        writeln!(self.writer, "───────────────────────────────────────────")?;
        Ok(())
    }

    fn write_header(&mut self, report: &ArchitectureReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer, "{}", "           ARCHITECTURE REPORT".bold().cyan())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(
            self.writer,
            "Callers: {}  Relations: {}  Classes: {}  Edges: {}",
            report.call_graph.callers,
            report.call_graph.relations,
            report.coupling_summary.class_count,
            report.coupling_summary.edge_count
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_coupling(&mut self, report: &ArchitectureReport) -> anyhow::Result<()> {
        self.write_section("COUPLING GRAPH")?;
        if report.coupling.is_empty() {
            writeln!(self.writer, "{}", "No cross-class calls".dimmed())?;
        } else {
            write!(self.writer, "{}", report.coupling.render())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_partition(&mut self, partition: &ModulePartition) -> anyhow::Result<()> {
        self.write_section(&format!(
            "MODULES (threshold {}, {} modules)",
            partition.threshold,
            partition.len()
        ))?;
        for (index, module) in partition.modules.iter().enumerate() {
            let classes = module
                .classes()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let cohesion = match module.cohesion() {
                Some(value) => format!("cohesion {:.4}", value),
                None => "single class".to_string(),
            };
            writeln!(
                self.writer,
                "  #{} {{{}}} {}",
                index + 1,
                classes,
                format!("({})", cohesion).dimmed()
            )?;
        }
        if let Some(diagnostic) = &partition.diagnostic {
            writeln!(self.writer, "  {} {}", "note:".yellow().bold(), diagnostic)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub fn create_writer<'a, W: Write + 'a>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{perform_architecture_analysis, AnalysisStage, ArchitectureOptions};
    use crate::call_graph::CallGraph;

    fn report(stage: AnalysisStage) -> ArchitectureReport {
        let call_graph: CallGraph = vec![
            ("A.run", "B.help"),
            ("A.run", "B.other"),
            ("B.help", "A.run"),
            ("A.stop", "C.log"),
        ]
        .into_iter()
        .collect();
        let options = ArchitectureOptions {
            stage,
            thresholds: vec![0.5],
            ..Default::default()
        };
        perform_architecture_analysis(&call_graph, &options).unwrap()
    }

    fn render(format: OutputFormat, report: &ArchitectureReport) -> String {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        create_writer(format, &mut buffer).write_report(report).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_json_report_has_sections() {
        let output = render(OutputFormat::Json, &report(AnalysisStage::Modules));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["call_graph"]["relations"], 4);
        assert_eq!(value["coupling_summary"]["class_count"], 3);
        assert!(value.get("dendrogram").is_none());
        assert_eq!(value["partitions"][0]["threshold"], 0.5);
    }

    #[test]
    fn test_terminal_lists_edges_and_modules() {
        let output = render(OutputFormat::Terminal, &report(AnalysisStage::Modules));
        assert!(output.contains("A -> B (weight = 0.5)"));
        assert!(output.contains("MODULES (threshold 0.5"));
    }

    #[test]
    fn test_markdown_includes_dendrogram_block() {
        let output = render(OutputFormat::Markdown, &report(AnalysisStage::Dendrogram));
        assert!(output.starts_with("# Architecture Report"));
        assert!(output.contains("```text\nmerge "));
    }
}
