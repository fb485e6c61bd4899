//! Owning-class derivation for method identifiers

use crate::errors::{Error, Result};

/// Separator between the class and the member in `Class.method`
pub const DEFAULT_SEPARATOR: &str = ".";

/// Derives the owning class of a method identifier.
///
/// The class is everything before the first occurrence of the separator.
/// An identifier without the separator is its own class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNameExtractor {
    separator: String,
}

impl ClassNameExtractor {
    pub fn new(separator: impl Into<String>) -> Result<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(Error::Configuration(
                "class separator must not be empty".to_string(),
            ));
        }
        Ok(Self { separator })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn class_of<'a>(&self, identifier: &'a str) -> &'a str {
        identifier
            .split_once(self.separator.as_str())
            .map_or(identifier, |(class, _)| class)
    }
}

impl Default for ClassNameExtractor {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}
