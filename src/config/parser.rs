use super::FileConfig;
use crate::errors::Error;
use std::fs;

use tracing::info;

/// Loads and parses the server configuration from a YAML file
///
/// # Arguments
///
/// * `file_path` - Path to the YAML configuration file
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into a FileConfig
pub fn load_config_file(file_path: &str) -> Result<FileConfig, Error> {
    let yaml_str = fs::read_to_string(file_path)?;
    // An empty file deserializes to unit, not a mapping.
    if yaml_str.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    let config: FileConfig = serde_yaml::from_str(&yaml_str)?;
    info!("Loaded configuration file: {}", file_path);
    Ok(config)
}
