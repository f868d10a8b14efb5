//! Configuration and placement persistence

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Window placement persistence keyed by an opaque string id
///
/// Windows restore their last dragged position on creation; everything else
/// about the store (where it lives, when it flushes) belongs to the host.
pub trait PlacementStore {
    /// Last stored position for an id
    fn load(&self, id: &str) -> Option<Vec2>;

    /// Remember a position for an id
    fn store(&mut self, id: &str, position: Vec2);
}

/// In-memory placement store for tests and hosts without persistence
#[derive(Debug, Default)]
pub struct MemoryPlacementStore {
    positions: HashMap<String, (f32, f32)>,
}

impl PlacementStore for MemoryPlacementStore {
    fn load(&self, id: &str) -> Option<Vec2> {
        self.positions.get(id).map(|&(x, y)| Vec2::new(x, y))
    }

    fn store(&mut self, id: &str, position: Vec2) {
        self.positions
            .insert(id.to_owned(), (position.x, position.y));
    }
}

/// Serialized payload of a [`FilePlacementStore`]
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlacementData {
    /// Window id to position mapping
    pub windows: HashMap<String, (f32, f32)>,
}

impl Config for PlacementData {}

/// Placement store persisted through the [`Config`] trait
///
/// Loads eagerly, saves on every store; the payload is a handful of entries,
/// so write amplification is irrelevant next to losing a position on crash.
#[derive(Debug)]
pub struct FilePlacementStore {
    path: PathBuf,
    data: PlacementData,
}

impl FilePlacementStore {
    /// Open (or initialize) a placement store at `path` (`.toml` or `.ron`)
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = match path.to_str().map(PlacementData::load_from_file) {
            Some(Ok(data)) => data,
            Some(Err(ConfigError::Io(_))) | None => PlacementData::default(),
            Some(Err(err)) => {
                log::warn!("placement store unreadable, starting fresh: {err}");
                PlacementData::default()
            }
        };
        Self { path, data }
    }

    fn flush(&self) {
        let Some(path) = self.path.to_str() else {
            return;
        };
        if let Err(err) = self.data.save_to_file(path) {
            log::warn!("failed to persist window placements: {err}");
        }
    }
}

impl PlacementStore for FilePlacementStore {
    fn load(&self, id: &str) -> Option<Vec2> {
        self.data.windows.get(id).map(|&(x, y)| Vec2::new(x, y))
    }

    fn store(&mut self, id: &str, position: Vec2) {
        self.data
            .windows
            .insert(id.to_owned(), (position.x, position.y));
        self.flush();
    }
}
