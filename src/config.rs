use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::network::Matrix;

/// Named topologies offered to the user. Owned by the front-end and handed to
/// the engine one matrix at a time; the engine never sees the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyCatalog {
    pub topologies: BTreeMap<String, Matrix>,
}

impl TopologyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small reference topologies available without a catalog file.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            "Matrix 1",
            vec![
                vec![0, 1, 4],
                vec![1, 0, 2],
                vec![4, 2, 0],
            ],
        );
        catalog.insert(
            "Matrix 2",
            vec![
                vec![0, 2, 0, 1, 0],
                vec![2, 0, 3, 2, 0],
                vec![0, 3, 0, 0, 1],
                vec![1, 2, 0, 0, 4],
                vec![0, 0, 1, 4, 0],
            ],
        );
        catalog.insert(
            "Matrix 3",
            vec![
                vec![0, 7, 0, 0, 0, 14],
                vec![7, 0, 10, 15, 0, 0],
                vec![0, 10, 0, 11, 0, 2],
                vec![0, 15, 11, 0, 6, 0],
                vec![0, 0, 0, 6, 0, 9],
                vec![14, 0, 2, 0, 9, 0],
            ],
        );
        catalog.insert(
            "Matrix 4",
            vec![
                vec![0, 1, 0, 0, 0, 0],
                vec![1, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 3, 0, 0],
                vec![0, 0, 3, 0, 5, 0],
                vec![0, 0, 0, 5, 0, 0],
                vec![0, 0, 0, 0, 0, 0],
            ],
        );
        catalog
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let catalog: TopologyCatalog = serde_json::from_str(&content)?;
        debug!("Loaded {} topologies from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn insert(&mut self, name: impl Into<String>, matrix: Matrix) {
        self.topologies.insert(name.into(), matrix);
    }

    pub fn get(&self, name: &str) -> Result<&Matrix> {
        self.topologies
            .get(name)
            .ok_or_else(|| TopologyError::UnknownTopology(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.topologies.keys().map(String::as_str)
    }

    /// Name shown first in a menu, if any.
    pub fn default_name(&self) -> Option<&str> {
        self.names().next()
    }

    pub fn len(&self) -> usize {
        self.topologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topologies.is_empty()
    }
}
