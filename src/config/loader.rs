//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading scheduler
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{SchedulerConfig, SchedulerFile};

/// File name looked up inside the configuration directory.
pub const SCHEDULER_FILE: &str = "scheduler.yaml";

/// Loads and provides access to scheduler configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── scheduler.yaml   # week start, legend palette, labels
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Weeks start on {}", loader.scheduler().week_starts_on());
/// # Ok::<(), roster_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    scheduler: SchedulerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `scheduler.yaml` is missing
    /// - the file contains invalid YAML
    /// - a value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file_path = path.as_ref().join(SCHEDULER_FILE);
        let content = Self::read(&file_path)?;
        Self::from_yaml_str(&content, &file_path.display().to_string())
    }

    /// Parses configuration from YAML text. `origin` is used in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        // An empty document deserializes to unit, not to an empty mapping.
        let file = if content.trim().is_empty() {
            SchedulerFile::default()
        } else {
            serde_yaml::from_str::<SchedulerFile>(content).map_err(|e| {
                EngineError::ConfigParseError {
                    path: origin.to_string(),
                    message: e.to_string(),
                }
            })?
        };

        let scheduler = SchedulerConfig::from_file(file)?;
        tracing::debug!(
            origin,
            week_starts_on = %scheduler.week_starts_on(),
            palette_size = scheduler.legend_palette().len(),
            "Loaded scheduler configuration"
        );
        Ok(Self { scheduler })
    }

    fn read(path: &Path) -> EngineResult<String> {
        fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })
    }

    /// Returns the scheduler settings.
    pub fn scheduler(&self) -> &SchedulerConfig {
        &self.scheduler
    }
}
