//! Whole-page rendering from controller state.
//!
//! The page is a pure function of `LibraryController`: the visible panel picks
//! which container is displayed, the expanded set drives section classes, and
//! the viewer state drives the modal and the body's scroll lock.

use crate::controller::LibraryController;
use crate::dom::Element;
use crate::render::{render_category_view, render_results};
use crate::search::Panel;
use crate::viewer::BackgroundScroll;

pub const SEARCH_INPUT_ID: &str = "searchInput";
pub const CLEAR_SEARCH_ID: &str = "clearSearch";
pub const NO_RESULTS_ID: &str = "noResults";
pub const MODAL_ID: &str = "pdfModal";
pub const MODAL_FRAME_ID: &str = "pdfViewer";
pub const CLOSE_MODAL_ID: &str = "closeModal";

const STYLESHEET: &str = "css/style.css";
const NO_RESULTS_MESSAGE: &str = "No documents found matching your search.";

fn display(visible: bool, shown_as: &str) -> String {
    format!("display: {}", if visible { shown_as } else { "none" })
}

/// Search field plus its clear control.
fn render_search_bar(query: &str) -> Element {
    Element::new("div")
        .class("search-container")
        .child(
            Element::new("input")
                .id(SEARCH_INPUT_ID)
                .class("search-input")
                .attr("type", "text")
                .attr("placeholder", "Search documents...")
                .attr("aria-label", "Search documents")
                .attr("value", query),
        )
        .child(
            Element::new("button")
                .id(CLEAR_SEARCH_ID)
                .class("clear-search")
                .attr("type", "button")
                .attr("aria-label", "Clear search")
                .text("\u{2715}"),
        )
}

fn render_modal(source: &str, open: bool) -> Element {
    let content = Element::new("div")
        .class("modal-content")
        .child(
            Element::new("button")
                .id(CLOSE_MODAL_ID)
                .class("close-modal")
                .attr("type", "button")
                .attr("aria-label", "Close viewer")
                .text("\u{00D7}"),
        )
        .child(
            Element::new("iframe")
                .id(MODAL_FRAME_ID)
                .class("pdf-viewer")
                .attr("title", "Document viewer")
                .attr("src", source),
        );

    Element::new("div")
        .id(MODAL_ID)
        .class("modal")
        .class_if("active", open)
        .attr("aria-hidden", if open { "false" } else { "true" })
        .child(content)
}

/// Build the `<html>` element for the current state.
pub fn render_page(controller: &LibraryController) -> Element {
    let panel = controller.panel();
    let viewer = controller.viewer();

    let mut categories = render_category_view(controller.groups(), controller.expanded());
    categories.set_attr("style", display(panel.is_categories(), "flex"));

    let mut results = render_results(panel.results());
    results.set_attr(
        "style",
        display(matches!(panel, Panel::Results(_)), "block"),
    );

    let no_results = Element::new("div")
        .id(NO_RESULTS_ID)
        .class("no-results")
        .attr("style", display(matches!(panel, Panel::NoResults), "block"))
        .child(Element::new("p").text(NO_RESULTS_MESSAGE));

    let title = controller.catalog().title();
    let main = Element::new("main")
        .class("container")
        .child(render_search_bar(controller.query()))
        .child(categories)
        .child(results)
        .child(no_results);

    let mut body = Element::new("body")
        .child(
            Element::new("header")
                .class("site-header")
                .child(Element::new("h1").text(title)),
        )
        .child(main)
        .child(render_modal(viewer.surface_source(), viewer.is_open()));
    if viewer.background_scroll() == BackgroundScroll::Locked {
        body.set_attr("style", "overflow: hidden");
    }

    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "UTF-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(Element::new("title").text(title))
        .child(
            Element::new("link")
                .attr("rel", "stylesheet")
                .attr("href", STYLESHEET),
        );

    Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(body)
}

/// Serialize the current state as a standalone HTML document.
pub fn render_document(controller: &LibraryController) -> String {
    format!("<!DOCTYPE html>\n{}\n", render_page(controller).to_html())
}
