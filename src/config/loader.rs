use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::ArchmapConfig;
use super::validation::validate_config;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".archmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read the raw contents of a config file
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<ArchmapConfig> {
    let config = toml::from_str::<ArchmapConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load an explicitly requested config file. Any problem is an error.
pub fn load_config_from(path: &Path) -> Result<ArchmapConfig> {
    let contents = read_config_file(path).map_err(|e| Error::input(path, e))?;
    parse_and_validate_config(&contents)
}

/// Try a discovered config file, falling back to `None` with a warning
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ArchmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Only log actual errors, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.archmap.toml` above `start`
pub fn discover_config(start: PathBuf) -> ArchmapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ArchmapConfig::default()
        })
}

/// Explicit path when given, otherwise discovery from the current directory
pub fn load_config(explicit: Option<&Path>) -> Result<ArchmapConfig> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    match std::env::current_dir() {
        Ok(dir) => Ok(discover_config(dir)),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            Ok(ArchmapConfig::default())
        }
    }
}
