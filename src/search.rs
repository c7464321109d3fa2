//! Live text search over the catalog.
//!
//! A query is trimmed and lowercased once; a document matches when the query
//! is a substring of its lowercased title, category or description. Results
//! keep catalog order. The outcome is a `Panel`, so exactly one of the three
//! display states is ever selected.

use crate::catalog::{Catalog, DocumentId, DocumentRecord};
use log::debug;

/// Normalized, non-empty search query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query(String);

impl Query {
    /// Trim and lowercase `raw`; blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, doc: &DocumentRecord) -> bool {
        let needle = self.0.as_str();
        doc.title.to_lowercase().contains(needle)
            || doc.category.as_str().to_lowercase().contains(needle)
            || doc.description().to_lowercase().contains(needle)
    }
}

/// Which of the three mutually exclusive views is visible.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Panel {
    #[default]
    Categories,
    Results(Vec<DocumentRecord>),
    NoResults,
}

impl Panel {
    pub fn is_categories(&self) -> bool {
        matches!(self, Panel::Categories)
    }

    /// Listed results; empty unless the results list is visible.
    pub fn results(&self) -> &[DocumentRecord] {
        match self {
            Panel::Results(documents) => documents,
            Panel::Categories | Panel::NoResults => &[],
        }
    }

    pub fn result_ids(&self) -> Vec<DocumentId> {
        self.results().iter().map(|doc| doc.id).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Panel::Categories => "categories",
            Panel::Results(_) => "results",
            Panel::NoResults => "no-results",
        }
    }
}

/// Documents matching `query`, in catalog order.
pub fn filter_catalog<'a>(catalog: &'a Catalog, query: &Query) -> Vec<&'a DocumentRecord> {
    catalog
        .documents
        .iter()
        .filter(|doc| query.matches(doc))
        .collect()
}

/// Run the search for one raw query string and pick the visible panel.
pub fn search(catalog: &Catalog, raw: &str) -> Panel {
    let Some(query) = Query::parse(raw) else {
        return Panel::Categories;
    };
    let matches = filter_catalog(catalog, &query);
    debug!("query {:?} matched {} documents", query.as_str(), matches.len());
    if matches.is_empty() {
        Panel::NoResults
    } else {
        Panel::Results(matches.into_iter().cloned().collect())
    }
}
