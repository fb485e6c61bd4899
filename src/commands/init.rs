use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Archmap Configuration

[call_graph]
# Separator between class and method in call graph identifiers
separator = "."

[clustering]
# A dendrogram subtree becomes a module once its average internal
# coupling is strictly greater than this value
threshold = 0.05

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn write_default_config(config_path: &Path, force: bool) -> Result<()> {
    if io::file_exists(config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(config_path, DEFAULT_CONFIG)?;
    tracing::debug!(path = %config_path.display(), "Wrote default configuration");
    Ok(())
}
