pub mod output;

pub use output::{create_writer, JsonWriter, MarkdownWriter, OutputFormat, OutputWriter, TerminalWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
