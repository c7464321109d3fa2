//! Indexed, validated view of a document catalog.
//!
//! The index is the authoring-time gate: it validates the raw file against
//! `schema/catalog.schema.json`, enforces the expected schema version, and
//! rejects duplicate ids or blank fields before any helper renders the
//! library. Rendering itself never re-checks these rules.

use crate::catalog::identity::{CategoryName, DocumentId};
use crate::catalog::model::{Catalog, DocumentRecord};
use crate::render::category_names;
use crate::schema_loader::{
    SchemaLoadOptions, extract_schema_version, is_identifier, load_json_schema,
};
use anyhow::{Context, Result, bail};
use log::{info, warn};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

// Only one catalog layout ships; reject unexpected versions rather than render
// a file whose fields may mean something else.
pub const DEFAULT_SCHEMA_VERSION: &str = "shelf_catalog_v1";

pub const CATALOG_SCHEMA_RELATIVE_PATH: &str = "schema/catalog.schema.json";

#[derive(Debug)]
/// Catalog plus a derived index keyed by document id.
pub struct CatalogIndex {
    catalog: Catalog,
    by_id: BTreeMap<DocumentId, usize>,
}

impl CatalogIndex {
    /// Load and validate the catalog from disk.
    ///
    /// Validates the file against the JSON schema, checks the schema version,
    /// ensures ids are unique and required strings are not blank.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = validate_against_schema(path)?;
        let catalog: Catalog = serde_json::from_value(raw)
            .with_context(|| format!("decoding catalog {}", path.display()))?;
        let index = Self::from_catalog(catalog)
            .with_context(|| format!("validating catalog {}", path.display()))?;
        info!(
            "catalog {} validated: {} documents in {} categories",
            path.display(),
            index.catalog.len(),
            index.categories().len()
        );
        Ok(index)
    }

    /// Validate an already-parsed catalog (no JSON schema pass).
    pub fn from_catalog(catalog: Catalog) -> Result<Self> {
        validate_schema_version(&catalog.schema_version)?;
        let by_id = build_index(&catalog)?;
        Ok(Self { catalog, by_id })
    }

    /// Resolve a document by id.
    ///
    /// Returns `None` instead of erroring; callers surface errors with the CLI
    /// context that referenced the missing id.
    pub fn document(&self, id: DocumentId) -> Option<&DocumentRecord> {
        self.by_id
            .get(&id)
            .and_then(|&pos| self.catalog.documents.get(pos))
    }

    /// Iterates document ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &DocumentId> {
        self.by_id.keys()
    }

    /// Distinct categories in section order.
    pub fn categories(&self) -> Vec<CategoryName> {
        category_names(&self.catalog)
    }

    /// Number of documents filed under each category.
    pub fn category_counts(&self) -> BTreeMap<CategoryName, usize> {
        let mut counts = BTreeMap::new();
        for doc in &self.catalog.documents {
            *counts.entry(doc.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Documents whose `path` does not point at a file under `base`.
    ///
    /// Paths carrying a URL scheme are left to the host and never reported.
    pub fn missing_documents(&self, base: &Path) -> Vec<&DocumentRecord> {
        self.catalog
            .documents
            .iter()
            .filter(|doc| !is_remote_locator(&doc.path))
            .filter(|doc| {
                let resolved = base.join(&doc.path);
                let missing = !resolved.is_file();
                if missing {
                    warn!("document {} not found at {}", doc.id, resolved.display());
                }
                missing
            })
            .collect()
    }

    /// Access the underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}

fn is_remote_locator(path: &str) -> bool {
    path.split_once("://")
        .map(|(scheme, _)| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
        .unwrap_or(false)
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !is_identifier(schema_version) {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    let mut allowed = BTreeSet::from([DEFAULT_SCHEMA_VERSION.to_string()]);
    if let Some(on_disk) = catalog_schema_version_from_disk() {
        allowed.insert(on_disk);
    }
    allowed
}

fn catalog_schema_version_from_disk() -> Option<String> {
    let file = File::open(canonical_catalog_schema_path()).ok()?;
    let value: Value = serde_json::from_reader(BufReader::new(file)).ok()?;
    extract_schema_version(&value, "/properties/schema_version/const")
}

fn canonical_catalog_schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(CATALOG_SCHEMA_RELATIVE_PATH)
}

fn build_index(catalog: &Catalog) -> Result<BTreeMap<DocumentId, usize>> {
    if catalog.documents.is_empty() {
        bail!("catalog contains no documents");
    }

    let mut map = BTreeMap::new();
    for (pos, doc) in catalog.documents.iter().enumerate() {
        if map.contains_key(&doc.id) {
            bail!("duplicate document id {}", doc.id);
        }
        for (field, value) in [
            ("title", doc.title.as_str()),
            ("category", doc.category.as_str()),
            ("filename", doc.filename.as_str()),
            ("path", doc.path.as_str()),
        ] {
            if value.trim().is_empty() {
                bail!("document {} has an empty {field}", doc.id);
            }
        }
        map.insert(doc.id, pos);
    }
    Ok(map)
}

fn validate_against_schema(catalog_path: &Path) -> Result<Value> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let catalog_version = catalog_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            expected_version: Some(&catalog_version),
            patch_schema_version_const: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;

    if let Err(errors) = schema.compiled.validate(&catalog_value) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "catalog {} failed schema validation:\n{}",
            catalog_path.display(),
            details
        );
    }
    Ok(catalog_value)
}

/// Prefer the schema shipped next to the catalog (`<root>/schema/...` for a
/// catalog at `<root>/data/library.json`), then the crate's own copy.
fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join(CATALOG_SCHEMA_RELATIVE_PATH);
        if candidate.exists() {
            return candidate;
        }
    }

    canonical_catalog_schema_path()
}
