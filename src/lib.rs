//! Shared library for the shelfview library viewer.
//!
//! The crate exposes the catalog types, the category renderer, the search and
//! viewer state, and the controller that ties them together. Public functions
//! here form the contract the helper binaries depend on: library-root
//! discovery, catalog path resolution, and list-flag parsing.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod controller;
pub mod dom;
pub mod events;
pub mod page;
pub mod render;
pub mod search;
pub mod viewer;

mod schema_loader;

pub use catalog::{
    Catalog, CatalogIndex, CategoryName, DocumentId, DocumentRecord, load_catalog_from_path,
};
pub use controller::LibraryController;
pub use dom::Element;
pub use events::{Key, UiEvent};
pub use page::{render_document, render_page};
pub use render::{CategoryGroup, category_names, group_by_category};
pub use search::{Panel, Query, filter_catalog, search};
pub use viewer::{BackgroundScroll, Viewer, ViewerState, ViewerTrigger};

pub const CATALOG_RELATIVE_PATH: &str = "data/library.json";
const SCHEMA_SENTINEL: &str = catalog::index::CATALOG_SCHEMA_RELATIVE_PATH;

/// Returns true when `candidate` looks like a library root: it ships both the
/// catalog and the schema that validates it.
fn is_library_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_RELATIVE_PATH).is_file() && candidate.join(SCHEMA_SENTINEL).is_file()
}

/// Verifies that an explicit root hint points at a valid library.
fn library_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_library_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_library_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the library root.
///
/// Honors `SHELF_ROOT` if it points at a real library, then climbs up from
/// the current executable, then falls back to the build-time hint.
pub fn find_library_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var("SHELF_ROOT") {
        if let Some(root) = library_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("SHELF_ROOT_HINT") {
        if let Some(root) = library_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate a shelfview library root. Set SHELF_ROOT to a directory containing {CATALOG_RELATIVE_PATH}, or pass --catalog."
    );
}

/// Catalog file shipped under a library root.
pub fn default_catalog_path(library_root: &Path) -> PathBuf {
    library_root.join(CATALOG_RELATIVE_PATH)
}

/// Resolve which catalog file a helper should load.
///
/// An explicit path (from `--catalog`) wins, then `SHELF_CATALOG`, then the
/// catalog under the discovered library root.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("catalog file not found: {}", path.display());
        }
        return Ok(path.to_path_buf());
    }

    if let Some(from_env) = env::var_os("SHELF_CATALOG").filter(|value| !value.is_empty()) {
        let path = PathBuf::from(from_env);
        if !path.is_file() {
            bail!("SHELF_CATALOG points at a missing file: {}", path.display());
        }
        return Ok(path);
    }

    Ok(default_catalog_path(&find_library_root()?))
}

/// Directory that relative document paths in `catalog_path` resolve against.
///
/// A catalog at `<root>/data/library.json` serves documents from `<root>`;
/// any other catalog serves them from its own directory.
pub fn document_base_dir(catalog_path: &Path) -> PathBuf {
    let parent = catalog_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    match parent.parent() {
        Some(root) if is_library_root(root) => root.to_path_buf(),
        _ => parent.to_path_buf(),
    }
}

/// Split comma- or whitespace-delimited flag values into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
