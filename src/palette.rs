use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::constellation::UNKNOWN_NAME;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("palette has no \"Unknown\" satellite network colour")]
    MissingUnknown,
}

/// Map colours, keyed by canonical constellation name for satellites.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: String,
    pub foreground: String,
    pub admin0_border: String,
    pub continents_border: String,
    pub cities: String,
    pub polar_grid: String,
    satellite_networks: HashMap<String, String>,
}

impl Palette {
    pub fn from_json(json: &str) -> Result<Self, PaletteError> {
        let palette: Palette = serde_json::from_str(json)?;
        if !palette.satellite_networks.contains_key(UNKNOWN_NAME) {
            return Err(PaletteError::MissingUnknown);
        }
        Ok(palette)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn lookup(&self, network_name: &str) -> Option<&str> {
        self.satellite_networks.get(network_name).map(String::as_str)
    }

    /// Colour for a constellation, falling back to the "Unknown" entry.
    pub fn color_for(&self, network_name: &str) -> &str {
        self.lookup(network_name)
            .or_else(|| self.lookup(UNKNOWN_NAME))
            .unwrap_or_default()
    }

    pub fn network_names(&self) -> impl Iterator<Item = &str> {
        self.satellite_networks.keys().map(String::as_str)
    }
}
