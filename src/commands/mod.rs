//! CLI command implementations for archmap operations.
//!
//! Available commands:
//! - **coupling**, **dendrogram**, **modules**: run the architecture
//!   recovery pipeline up to the corresponding stage
//! - **init**: Initialize a new archmap configuration file

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
