//! Single owner of all page state.
//!
//! `LibraryController` is built once from a catalog and then only receives
//! events. It holds the derived category groups, the per-section expanded
//! set, the current query with its selected `Panel`, and the viewer. Search
//! never touches the expanded set, so clearing a query restores the category
//! view exactly as it was left.

use crate::catalog::{Catalog, CategoryName, DocumentId, DocumentRecord};
use crate::events::{Key, UiEvent};
use crate::render::{CategoryGroup, group_by_category};
use crate::search::{Panel, search};
use crate::viewer::{Viewer, ViewerTrigger};
use log::debug;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
pub struct LibraryController {
    catalog: Catalog,
    groups: Vec<CategoryGroup>,
    expanded: BTreeSet<CategoryName>,
    query: String,
    panel: Panel,
    viewer: Viewer,
}

impl LibraryController {
    pub fn new(catalog: Catalog) -> Self {
        let groups = group_by_category(&catalog);
        debug!(
            "controller ready: {} documents, {} sections",
            catalog.len(),
            groups.len()
        );
        Self {
            catalog,
            groups,
            expanded: BTreeSet::new(),
            query: String::new(),
            panel: Panel::Categories,
            viewer: Viewer::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn expanded(&self) -> &BTreeSet<CategoryName> {
        &self.expanded
    }

    pub fn is_expanded(&self, name: &CategoryName) -> bool {
        self.expanded.contains(name)
    }

    /// Raw text of the search field.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// The search field changed; recompute the visible panel immediately.
    pub fn input_query(&mut self, raw: impl Into<String>) {
        self.query = raw.into();
        self.panel = search(&self.catalog, &self.query);
    }

    /// Empty the search field and return to the category view.
    pub fn clear_search(&mut self) {
        self.query.clear();
        self.panel = Panel::Categories;
    }

    /// Flip one section; returns its new expanded state, or `None` when no
    /// section carries `name`.
    pub fn toggle_section(&mut self, name: &CategoryName) -> Option<bool> {
        if !self.groups.iter().any(|group| &group.name == name) {
            return None;
        }
        let expanded = if self.expanded.remove(name) {
            false
        } else {
            self.expanded.insert(name.clone());
            true
        };
        debug!("section {name} expanded={expanded}");
        Some(expanded)
    }

    /// Keyboard activation on a focused section header.
    pub fn header_key(&mut self, name: &CategoryName, key: &Key) -> Option<bool> {
        if key.activates() {
            self.toggle_section(name)
        } else {
            None
        }
    }

    /// "View" on an entry.
    pub fn view(&mut self, path: impl Into<String>) {
        self.viewer.open(path);
    }

    /// Open the first document carrying `id`; returns it when found.
    pub fn view_document(&mut self, id: DocumentId) -> Option<&DocumentRecord> {
        let path = self.catalog.document(id)?.path.clone();
        self.viewer.open(path);
        self.catalog.document(id)
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::QueryInput(raw) => self.input_query(raw),
            UiEvent::ClearSearch => self.clear_search(),
            UiEvent::HeaderClick(name) => {
                self.toggle_section(&name);
            }
            UiEvent::HeaderKey(name, key) => {
                self.header_key(&name, &key);
            }
            UiEvent::View(path) => self.view(path),
            UiEvent::ViewDocument(id) => {
                self.view_document(id);
            }
            UiEvent::CloseButton => {
                self.viewer.handle(&ViewerTrigger::CloseButton);
            }
            UiEvent::Backdrop => {
                self.viewer.handle(&ViewerTrigger::Backdrop);
            }
            UiEvent::ModalContent => {
                self.viewer.handle(&ViewerTrigger::Content);
            }
            UiEvent::PageKey(key) => {
                self.viewer.handle(&ViewerTrigger::Key(key));
            }
        }
    }
}
