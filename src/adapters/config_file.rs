//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] on top of a single JSON file.  A missing file
//! yields factory defaults; partial files fill in the remaining fields from
//! defaults.  Every load and save is validated.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::ConfigPort;
use crate::config::SystemConfig;
use crate::error::ConfigError;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("JsonConfigFile: {} not found, using defaults", self.path.display());
                return Ok(SystemConfig::default());
            }
            Err(e) => {
                warn!("JsonConfigFile: read {} failed: {e}", self.path.display());
                return Err(ConfigError::IoError);
            }
        };

        let cfg: SystemConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("JsonConfigFile: {} is not valid config: {e}", self.path.display());
            ConfigError::Corrupted
        })?;
        cfg.validate()?;
        info!("JsonConfigFile: loaded {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::IoError)?;
        fs::write(&self.path, text).map_err(|e| {
            warn!("JsonConfigFile: write {} failed: {e}", self.path.display());
            ConfigError::IoError
        })?;
        info!("JsonConfigFile: saved {}", self.path.display());
        Ok(())
    }
}
