//! Document catalog wiring.
//!
//! This module wraps the JSON catalog under `data/library.json` so helpers can
//! load a validated snapshot and expose consistent identifiers. Types here
//! mirror the schema fields; callers use `CatalogIndex` for validated lookups
//! and the plain `Catalog` when rendering.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CategoryName, DocumentId};
pub use index::{CatalogIndex, DEFAULT_SCHEMA_VERSION};
pub use model::{Catalog, DEFAULT_LIBRARY_TITLE, DocumentRecord};

pub use model::load_catalog_from_path;
