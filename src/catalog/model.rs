//! Deserializable representation of `data/library.json`.
//!
//! The types mirror the catalog schema so the renderer, search and CLI helpers
//! can work on typed records instead of ad-hoc JSON. Use `CatalogIndex` when
//! the catalog must be validated; use these structs directly when any parsed
//! catalog is acceptable (rendering never rejects authoring mistakes).

use crate::catalog::identity::{CategoryName, DocumentId};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_LIBRARY_TITLE: &str = "Study Materials Library";

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Full document catalog as stored on disk.
pub struct Catalog {
    pub schema_version: String,
    #[serde(default)]
    pub title: Option<String>,
    pub documents: Vec<DocumentRecord>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
/// One document entry in the library.
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: String,
    pub category: CategoryName,
    pub filename: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Catalog {
    /// Build an in-memory catalog, mostly for tests and embedding callers.
    pub fn new(documents: Vec<DocumentRecord>) -> Self {
        Self {
            schema_version: crate::catalog::index::DEFAULT_SCHEMA_VERSION.to_string(),
            title: None,
            documents,
        }
    }

    /// Page heading, falling back to the default library name.
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(DEFAULT_LIBRARY_TITLE)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// First record carrying `id`, in catalog order.
    pub fn document(&self, id: DocumentId) -> Option<&DocumentRecord> {
        self.documents.iter().find(|doc| doc.id == id)
    }
}

impl DocumentRecord {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        category: impl Into<String>,
        filename: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: DocumentId(id),
            title: title.into(),
            category: CategoryName(category.into()),
            filename: filename.into(),
            path: path.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description with absence folded into the empty string.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Whether the description carries anything worth laying out.
    pub fn has_description(&self) -> bool {
        !self.description().trim().is_empty()
    }
}

/// Read and parse a catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<Catalog> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&data)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    info!(
        "loaded {} documents from {}",
        catalog.documents.len(),
        path.display()
    );
    Ok(catalog)
}
