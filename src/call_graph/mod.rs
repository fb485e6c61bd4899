//! Method-level call graph consumed by the coupling analysis
//!
//! The call graph maps a caller identifier (conventionally `Class.method`)
//! to the set of identifiers it invokes. It is produced by source analysis
//! outside this crate and read here from JSON.

mod class_name;
mod types;

pub use class_name::{ClassNameExtractor, DEFAULT_SEPARATOR};
pub use types::CallGraph;
