//! Configuration loading and management for the Roster Engine.
//!
//! This module loads scheduler settings (week start day, legend palette,
//! fallback labels) from a YAML file. Every setting has a default, so hosts
//! that do not ship a file can use [`SchedulerConfig::default`].
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Unknown label: {}", config.scheduler().unknown_label());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SCHEDULER_FILE};
pub use types::{DEFAULT_LEGEND_PALETTE, DEFAULT_UNKNOWN_LABEL, SchedulerConfig, SchedulerFile};
