// Core configuration types
mod core;
mod loader;
pub mod validation;

pub use self::core::{
    ArchmapConfig, CallGraphConfig, ClusteringConfig, OutputConfig, DEFAULT_THRESHOLD,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use validation::{collect_field_errors, validate_config, FieldError};
