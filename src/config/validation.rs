//! Configuration validation with error accumulation.
//!
//! Every problem is collected before reporting, so a user sees all
//! configuration issues in a single run. Messages are prefixed with the
//! dotted field path, e.g. `clustering.threshold: must be a finite number`.

use super::core::ArchmapConfig;
use crate::io::OutputFormat;
use crate::errors::{Error, Result};

/// A single invalid field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors of `config`, empty when valid
pub fn collect_field_errors(config: &ArchmapConfig) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(separator) = config.call_graph.as_ref().and_then(|c| c.separator.as_ref()) {
        if separator.is_empty() {
            errors.push(FieldError {
                field: "call_graph.separator",
                message: "must not be empty".to_string(),
            });
        }
    }

    if let Some(threshold) = config.clustering.as_ref().and_then(|c| c.threshold) {
        if !threshold.is_finite() {
            errors.push(FieldError {
                field: "clustering.threshold",
                message: format!("must be a finite number (got {})", threshold),
            });
        }
    }

    if let Some(format) = config.default_format() {
        if format.parse::<OutputFormat>().is_err() {
            errors.push(FieldError {
                field: "output.default_format",
                message: format!(
                    "unknown format '{}' (expected terminal, json or markdown)",
                    format
                ),
            });
        }
    }

    errors
}

/// Fail with every field error joined into one message
pub fn validate_config(config: &ArchmapConfig) -> Result<()> {
    let errors = collect_field_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(Error::Configuration(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CallGraphConfig, ClusteringConfig, OutputConfig};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ArchmapConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_are_reported() {
        let config = ArchmapConfig {
            call_graph: Some(CallGraphConfig {
                separator: Some(String::new()),
            }),
            clustering: Some(ClusteringConfig {
                threshold: Some(f64::NAN),
            }),
            output: Some(OutputConfig {
                default_format: Some("html".to_string()),
                use_color: None,
            }),
        };

        let errors = collect_field_errors(&config);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "call_graph.separator",
                "clustering.threshold",
                "output.default_format"
            ]
        );

        let message = validate_config(&config).unwrap_err().to_string();
        assert!(message.contains("call_graph.separator: must not be empty"));
        assert!(message.contains("unknown format 'html'"));
    }
}
