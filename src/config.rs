use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::palette::{Palette, PaletteError};
use crate::projection::Observer;
use crate::track::RetentionPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid station coordinates: {0:?}")]
    InvalidCoordinates(String),
    #[error("palette {path}: {source}")]
    Palette {
        path: PathBuf,
        #[source]
        source: PaletteError,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub station: StationConfig,
    #[serde(default = "default_palette")]
    pub palette: PathBuf,
    #[serde(default)]
    pub trail: TrailConfig,
}

fn default_palette() -> PathBuf {
    PathBuf::from("palettes/default.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    pub coordinates: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrailConfig {
    pub max_history: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub max_age: Option<chrono::Duration>,
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<chrono::Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    humantime::parse_duration(text.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| chrono::Duration::from_std(d).map_err(|e| e.to_string()))
        .map(Some)
        .map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.observer()?;
        Ok(config)
    }

    pub fn observer(&self) -> Result<Observer, ConfigError> {
        Observer::from_coordinates(&self.station.coordinates)
            .ok_or_else(|| ConfigError::InvalidCoordinates(self.station.coordinates.clone()))
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy {
            max_history: self.trail.max_history,
            max_age: self.trail.max_age,
        }
    }

    /// Loads the palette, relative paths resolved against `base`.
    pub fn load_palette(&self, base: &Path) -> Result<Palette, ConfigError> {
        let path = if self.palette.is_absolute() {
            self.palette.clone()
        } else {
            base.join(&self.palette)
        };
        Palette::load(&path).map_err(|source| ConfigError::Palette { path, source })
    }
}
