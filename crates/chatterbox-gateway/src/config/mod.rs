//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use chatterbox_core::error::{ChatterboxError, Result};

pub use schema::{ChatSection, GatewayConfig, RealtimeSection, ServerSection};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CHATTERBOX_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "chatterbox.yaml";

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path.as_ref())
        .map_err(|e| ChatterboxError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

/// Like [`load_from_file`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        return Ok(GatewayConfig::default());
    }
    load_from_file(path)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| ChatterboxError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
