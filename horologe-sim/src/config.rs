//! Face configuration loading

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use horologe_core::config::FaceConfig;
use log::info;

/// Parse a face configuration from TOML text
///
/// Missing keys take their defaults.
pub fn parse_config(text: &str) -> Result<FaceConfig> {
    let config: FaceConfig = toml::from_str(text).context("invalid face configuration")?;
    config.validate()?;
    Ok(config)
}

/// Load the face configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<FaceConfig> {
    let Some(path) = path else {
        info!("Using default face configuration");
        return Ok(FaceConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = parse_config(&text).with_context(|| format!("in {}", path.display()))?;
    info!("Loaded face configuration from {}", path.display());
    Ok(config)
}
