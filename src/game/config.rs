// Game configuration loaded from an optional TOML file

use super::screens::Settings;
use super::tuning::{CameraTuning, TuningError, VehicleTuning};
use crate::engine::input::BindingOverrides;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "ARCADE_RACER_CONFIG";

/// Config file picked up from the working directory when the variable is unset
pub const DEFAULT_CONFIG_FILE: &str = "racer.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] TuningError),
}

/// World simulation settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Vertical gravity in m/s² (arcade-strong by default)
    pub gravity: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self { gravity: -30.0 }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsSettings,
    pub vehicle: VehicleTuning,
    pub camera: CameraTuning,
    /// Key remaps over the default bindings
    pub controls: BindingOverrides,
    pub settings: Settings,
    /// Fixed seed for spin-outs and camera shake; random when absent
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Load from `ARCADE_RACER_CONFIG`, else `racer.toml` if present, else defaults
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            log::info!("Loading config from {}", path.display());
            return Self::load(&path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            log::info!("Loading config from {}", local.display());
            return Self::load(local);
        }

        log::info!("No config file found, using built-in tuning");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !self.physics.gravity.is_finite() {
            return Err(TuningError::NotFinite {
                name: "physics.gravity",
                value: self.physics.gravity,
            });
        }
        self.vehicle.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}
