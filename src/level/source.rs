//! Level sources: where level descriptions come from.

use std::path::{Path, PathBuf};

use log::debug;
use rustc_hash::FxHashMap;

use super::description::LevelDescription;
use crate::core::LevelError;

/// Loads level descriptions by name.
///
/// Any failure is fatal for the level; callers never build a partial board.
pub trait LevelSource {
    fn load(&self, name: &str) -> Result<LevelDescription, LevelError>;
}

/// Reads `<root>/<name>.json` from disk.
#[derive(Clone, Debug)]
pub struct DirLevelSource {
    root: PathBuf,
}

impl DirLevelSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a level name resolves to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl LevelSource for DirLevelSource {
    fn load(&self, name: &str) -> Result<LevelDescription, LevelError> {
        let path = self.path_for(name);
        debug!("loading level {}", path.display());
        let json = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LevelError::NotFound(path.clone())
            } else {
                LevelError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        LevelDescription::from_json(&json)
    }
}

/// In-memory levels keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryLevelSource {
    levels: FxHashMap<String, LevelDescription>,
}

impl MemoryLevelSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a level (builder pattern).
    #[must_use]
    pub fn with_level(mut self, name: impl Into<String>, level: LevelDescription) -> Self {
        self.levels.insert(name.into(), level);
        self
    }
}

impl LevelSource for MemoryLevelSource {
    fn load(&self, name: &str) -> Result<LevelDescription, LevelError> {
        self.levels
            .get(name)
            .cloned()
            .ok_or_else(|| LevelError::NotFound(PathBuf::from(name)))
    }
}
