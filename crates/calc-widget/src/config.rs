//! Widget configuration
//!
//! Loaded from YAML; every field is optional and falls back to its default.
//! CLI flags are applied on top with the `with_*` builders.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::appearance::{SizePreset, Theme};
use crate::core::history::History;
use crate::particles::DEFAULT_PARTICLE_COUNT;

/// Upper bound on the particle count
pub const MAX_PARTICLES: usize = 10_000;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A value is out of range
    #[error("Invalid config: {message}")]
    Invalid {
        /// What is wrong
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Particle background settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleConfig {
    /// Draw and animate the background
    pub enabled: bool,
    /// Number of particles
    pub count: usize,
    /// RNG seed; the binary picks a time-based one when absent
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: DEFAULT_PARTICLE_COUNT,
            seed: None,
        }
    }
}

/// Complete widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    /// Initial theme
    pub theme: Theme,
    /// Initial size preset
    pub size: SizePreset,
    /// Particle background
    pub particles: ParticleConfig,
    /// Milliseconds between animation frames
    pub frame_interval_ms: u64,
    /// Maximum tape history entries
    pub history_capacity: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            size: SizePreset::Normal,
            particles: ParticleConfig::default(),
            frame_interval_ms: 33,
            history_capacity: History::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl WidgetConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses YAML and validates the result
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Checks value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::invalid("frame_interval_ms must be greater than 0"));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::invalid("history_capacity must be greater than 0"));
        }
        if self.particles.count > MAX_PARTICLES {
            return Err(ConfigError::invalid(format!(
                "particles.count must be at most {MAX_PARTICLES}, got {}",
                self.particles.count
            )));
        }
        Ok(())
    }

    /// Frame interval as a duration
    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Set theme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set size preset
    #[must_use]
    pub const fn with_size(mut self, size: SizePreset) -> Self {
        self.size = size;
        self
    }

    /// Enable or disable particles
    #[must_use]
    pub const fn with_particles_enabled(mut self, enabled: bool) -> Self {
        self.particles.enabled = enabled;
        self
    }

    /// Set particle count
    #[must_use]
    pub const fn with_particle_count(mut self, count: usize) -> Self {
        self.particles.count = count;
        self
    }

    /// Set particle seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.particles.seed = Some(seed);
        self
    }

    /// Set frame interval
    #[must_use]
    pub const fn with_frame_interval_ms(mut self, ms: u64) -> Self {
        self.frame_interval_ms = ms;
        self
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
