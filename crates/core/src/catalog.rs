use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::product::CatalogItem;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
    #[error("catalog entry {index} has a negative price")]
    NegativePrice { index: usize },
}

/// Read-only product catalog, loaded once and shared by every query.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let items: Vec<CatalogItem> = serde_json::from_str(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;

        if let Some(index) = items.iter().position(|item| item.price < 0.0) {
            return Err(CatalogError::NegativePrice { index });
        }

        debug!(
            event_name = "advisor.catalog.loaded",
            path = %path.display(),
            item_count = items.len(),
            "catalog loaded"
        );
        Ok(Self::new(items))
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, brand: &str, product_name: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.identity() == (brand, product_name))
    }
}
