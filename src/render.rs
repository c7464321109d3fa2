//! Category sections and document entries.
//!
//! Categories are never stored: they are derived from the catalog on demand
//! (`category_names`), so a category disappears as soon as its last document
//! leaves the data file. Sections list documents in catalog order; only the
//! sections themselves are sorted.

use crate::catalog::{Catalog, CategoryName, DocumentRecord};
use crate::dom::Element;
use std::collections::{BTreeMap, BTreeSet};

pub const CATEGORIES_CONTAINER_ID: &str = "categoriesContainer";
pub const SEARCH_RESULTS_ID: &str = "searchResults";
pub const SECTION_ARROW: &str = "\u{25BC}";
pub const EXPANDED_CLASS: &str = "expanded";

/// One category and the documents filed under it, in catalog order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CategoryGroup {
    pub name: CategoryName,
    pub documents: Vec<DocumentRecord>,
}

/// Distinct category values, sorted ascending.
pub fn category_names(catalog: &Catalog) -> Vec<CategoryName> {
    catalog
        .documents
        .iter()
        .map(|doc| doc.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Group the catalog into sections ordered by category name.
pub fn group_by_category(catalog: &Catalog) -> Vec<CategoryGroup> {
    let mut groups: BTreeMap<&CategoryName, Vec<DocumentRecord>> = BTreeMap::new();
    for doc in &catalog.documents {
        groups.entry(&doc.category).or_default().push(doc.clone());
    }
    groups
        .into_iter()
        .map(|(name, documents)| CategoryGroup {
            name: name.clone(),
            documents,
        })
        .collect()
}

/// Build the entry for one document: title, optional description, and the
/// view/download actions.
pub fn render_entry(doc: &DocumentRecord) -> Element {
    let mut info = Element::new("div")
        .class("pdf-info")
        .child(Element::new("div").class("pdf-title").text(&doc.title));
    if doc.has_description() {
        info.append(
            Element::new("div")
                .class("pdf-description")
                .text(doc.description()),
        );
    }

    let actions = Element::new("div")
        .class("pdf-actions")
        .child(
            Element::new("button")
                .class("btn-view")
                .attr("type", "button")
                .attr("data-pdf-path", &doc.path)
                .text("View"),
        )
        .child(
            Element::new("a")
                .class("btn-download")
                .attr("href", &doc.path)
                .attr("download", &doc.filename)
                .text("Download"),
        );

    Element::new("div")
        .class("pdf-item")
        .attr("data-id", doc.id.to_string())
        .child(info)
        .child(actions)
}

/// Build one collapsible section. `expanded` drives the header, arrow and
/// content classes together with `aria-expanded`.
pub fn render_section(group: &CategoryGroup, expanded: bool) -> Element {
    let header = Element::new("div")
        .class("category-header")
        .class_if(EXPANDED_CLASS, expanded)
        .attr("role", "button")
        .attr("tabindex", "0")
        .attr("aria-expanded", if expanded { "true" } else { "false" })
        .attr("data-category", group.name.as_str())
        .child(
            Element::new("h3")
                .class("category-title")
                .text(group.name.as_str()),
        )
        .child(
            Element::new("span")
                .class("category-arrow")
                .class_if(EXPANDED_CLASS, expanded)
                .text(SECTION_ARROW),
        );

    let content = Element::new("div")
        .class("category-content")
        .class_if(EXPANDED_CLASS, expanded)
        .children(group.documents.iter().map(render_entry));

    Element::new("div")
        .class("category")
        .child(header)
        .child(content)
}

/// The full category view; sections named in `expanded` render open.
pub fn render_category_view(
    groups: &[CategoryGroup],
    expanded: &BTreeSet<CategoryName>,
) -> Element {
    Element::new("div")
        .id(CATEGORIES_CONTAINER_ID)
        .class("categories-container")
        .children(
            groups
                .iter()
                .map(|group| render_section(group, expanded.contains(&group.name))),
        )
}

/// Flat result list: same entry layout, no grouping or collapsing.
pub fn render_results<'a, I>(documents: I) -> Element
where
    I: IntoIterator<Item = &'a DocumentRecord>,
{
    Element::new("div")
        .id(SEARCH_RESULTS_ID)
        .class("search-results")
        .children(documents.into_iter().map(render_entry))
}
