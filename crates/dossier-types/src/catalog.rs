//! In-memory property catalog

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::property::PropertyRecord;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate property id: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    properties: Vec<PropertyRecord>,
}

impl Catalog {
    pub fn new(properties: Vec<PropertyRecord>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for p in &properties {
            if !seen.insert(p.id.as_str()) {
                return Err(CatalogError::DuplicateId(p.id.clone()));
            }
        }
        Ok(Self { properties })
    }

    /// Parse a JSON array of property records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let properties: Vec<PropertyRecord> = serde_json::from_str(json)?;
        Self::new(properties)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn get(&self, id: &str) -> Option<&PropertyRecord> {
        self.properties.iter().find(|p| p.id == id)
    }

    pub fn properties(&self) -> &[PropertyRecord] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
