// Centralized integration suite for the library viewer; exercises catalog
// validation, the page state machine end to end, and the helper binaries so
// changes surface in one place.
mod support;

use anyhow::{Context, Result};
use serde_json::Value;
use shelfview::page::{MODAL_FRAME_ID, MODAL_ID, NO_RESULTS_ID};
use shelfview::render::{CATEGORIES_CONTAINER_ID, SEARCH_RESULTS_ID};
use shelfview::{
    CatalogIndex, CategoryName, DocumentId, Element, Key, LibraryController, Panel, UiEvent,
    category_names, load_catalog_from_path, render_page,
};
use std::fs;
use support::{FixtureLibrary, doc, helper_command, repo_root, run_command};

fn shipped_controller() -> Result<LibraryController> {
    let index = CatalogIndex::load(&repo_root().join("data/library.json"))?;
    Ok(LibraryController::new(index.into_catalog()))
}

fn visible_panel_ids(page: &Element) -> Vec<&'static str> {
    [CATEGORIES_CONTAINER_ID, SEARCH_RESULTS_ID, NO_RESULTS_ID]
        .into_iter()
        .filter(|id| {
            page.find_by_id(id)
                .and_then(|el| el.get_attr("style"))
                .is_some_and(|style| style != "display: none")
        })
        .collect()
}

fn section_titles(page: &Element) -> Vec<String> {
    page.find_all_by_class("category-title")
        .into_iter()
        .map(Element::text_content)
        .collect()
}

// Three records across two categories: two sections, alphabetical, with the
// Biology entries in catalog order.
#[test]
fn grouping_matches_reference_catalog() -> Result<()> {
    let library = FixtureLibrary::new(vec![
        doc(1, "Cells", "Biology", None),
        doc(2, "Motion", "Physics", None),
        doc(3, "Genes", "Biology", None),
    ])?;
    let catalog = load_catalog_from_path(&library.catalog_path())?;
    assert_eq!(
        category_names(&catalog),
        vec![CategoryName::from("Biology"), CategoryName::from("Physics")]
    );

    let page = render_page(&LibraryController::new(catalog));
    assert_eq!(section_titles(&page), vec!["Biology", "Physics"]);
    let sections = page.find_all_by_class("category");
    let biology_titles: Vec<String> = sections[0]
        .find_all_by_class("pdf-title")
        .into_iter()
        .map(Element::text_content)
        .collect();
    assert_eq!(biology_titles, vec!["Cells", "Genes"]);
    Ok(())
}

#[test]
fn shipped_catalog_renders_every_document_once() -> Result<()> {
    let ctl = shipped_controller()?;
    let page = render_page(&ctl);
    assert_eq!(
        section_titles(&page),
        vec!["Biology", "Chemistry", "Mathematics", "Physics"]
    );
    assert_eq!(
        page.find_all_by_class("pdf-item").len(),
        ctl.catalog().documents.len()
    );
    Ok(())
}

// Walks a realistic session: expand a section, search, miss, clear, view.
#[test]
fn session_keeps_panels_exclusive_and_collapse_state_stable() -> Result<()> {
    let mut ctl = shipped_controller()?;
    let mathematics = CategoryName::from("Mathematics");
    ctl.dispatch(UiEvent::HeaderKey(mathematics.clone(), Key::from_dom("Enter")));
    ctl.dispatch(UiEvent::HeaderClick(CategoryName::from("Biology")));
    ctl.dispatch(UiEvent::HeaderClick(CategoryName::from("Biology")));
    let before = render_page(&ctl)
        .find_by_id(CATEGORIES_CONTAINER_ID)
        .cloned()
        .context("categories container")?;

    for (raw, expected) in [
        ("p", SEARCH_RESULTS_ID),
        ("ph", SEARCH_RESULTS_ID),
        ("phy", SEARCH_RESULTS_ID),
        ("xyz-does-not-exist", NO_RESULTS_ID),
        ("", CATEGORIES_CONTAINER_ID),
        ("stoichiometry", SEARCH_RESULTS_ID),
    ] {
        ctl.dispatch(UiEvent::QueryInput(raw.to_string()));
        assert_eq!(
            visible_panel_ids(&render_page(&ctl)),
            vec![expected],
            "query {raw:?}"
        );
    }
    assert_eq!(ctl.panel().result_ids(), vec![DocumentId(9)]);

    ctl.dispatch(UiEvent::ClearSearch);
    let page = render_page(&ctl);
    let after = page
        .find_by_id(CATEGORIES_CONTAINER_ID)
        .context("categories container")?;
    assert_eq!(after.to_html(), before.to_html());
    assert!(ctl.is_expanded(&mathematics));
    assert!(!ctl.is_expanded(&CategoryName::from("Biology")));
    Ok(())
}

#[test]
fn search_results_satisfy_predicate_on_shipped_catalog() -> Result<()> {
    let ctl = shipped_controller()?;
    for raw in ["Physics", "cell", "  MATRIX ", "chem", "e", "laws"] {
        let needle = raw.trim().to_lowercase();
        let panel = shelfview::search(ctl.catalog(), raw);
        let hits = panel.result_ids();
        for record in &ctl.catalog().documents {
            let matches = record.title.to_lowercase().contains(&needle)
                || record.category.as_str().to_lowercase().contains(&needle)
                || record.description().to_lowercase().contains(&needle);
            assert_eq!(hits.contains(&record.id), matches, "{raw:?} vs {}", record.id);
        }
        assert!(matches!(panel, Panel::Results(_)));
    }
    Ok(())
}

#[test]
fn viewer_round_trips_leave_no_document_loaded() -> Result<()> {
    let mut ctl = shipped_controller()?;
    let closers = [
        UiEvent::CloseButton,
        UiEvent::Backdrop,
        UiEvent::PageKey(Key::from_dom("Escape")),
    ];
    for (round, closer) in closers.into_iter().enumerate() {
        ctl.dispatch(UiEvent::ViewDocument(DocumentId(round as u64 + 1)));
        let open = render_page(&ctl);
        assert!(
            open.find_by_id(MODAL_ID)
                .is_some_and(|modal| modal.has_class("active"))
        );
        ctl.dispatch(closer);
        let closed = render_page(&ctl);
        assert_eq!(
            closed
                .find_by_id(MODAL_FRAME_ID)
                .and_then(|frame| frame.get_attr("src")),
            Some("")
        );
        assert!(!closed.to_html().contains("overflow: hidden"));
    }
    Ok(())
}

#[test]
fn render_helper_writes_requested_state() -> Result<()> {
    let library = FixtureLibrary::new(vec![
        doc(1, "Cells", "Biology", Some("Cell <structure> & function")),
        doc(2, "Motion", "Physics", None),
    ])?;
    let out = library.root().join("index.html");
    let mut cmd = helper_command("shelf-render", library.root());
    cmd.arg("--out")
        .arg(&out)
        .arg("--expand")
        .arg("Physics")
        .arg("--view")
        .arg("2");
    run_command(cmd)?;

    let html = fs::read_to_string(&out)?;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Fixture Library</h1>"));
    assert!(html.contains("Cell &lt;structure&gt; &amp; function"));
    assert!(html.contains("class=\"modal active\""));
    assert!(html.contains("src=\"pdfs/motion.pdf\""));
    assert!(html.contains("aria-expanded=\"true\" data-category=\"Physics\""));
    assert!(html.contains("aria-expanded=\"false\" data-category=\"Biology\""));
    Ok(())
}

#[test]
fn render_helper_rejects_unknown_category() -> Result<()> {
    let library = FixtureLibrary::new(vec![doc(1, "Cells", "Biology", None)])?;
    let mut cmd = helper_command("shelf-render", library.root());
    cmd.arg("--expand").arg("History");
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown category 'History'"));
    Ok(())
}

#[test]
fn search_helper_emits_ndjson_in_catalog_order() -> Result<()> {
    let library = FixtureLibrary::new(vec![
        doc(5, "Optics", "Physics", Some("Light and lenses")),
        doc(2, "Cells", "Biology", None),
        doc(3, "Light Reactions", "Biology", None),
    ])?;
    let mut cmd = helper_command("shelf-search", library.root());
    cmd.arg("LIGHT");
    let output = run_command(cmd)?;
    let ids: Vec<u64> = String::from_utf8(output.stdout)?
        .lines()
        .map(|line| {
            let value: Value = serde_json::from_str(line)?;
            value
                .get("id")
                .and_then(Value::as_u64)
                .context("record id")
        })
        .collect::<Result<_>>()?;
    assert_eq!(ids, vec![5, 3]);
    Ok(())
}

#[test]
fn search_helper_treats_no_results_as_success() -> Result<()> {
    let library = FixtureLibrary::new(vec![doc(1, "Cells", "Biology", None)])?;
    let mut cmd = helper_command("shelf-search", library.root());
    cmd.arg("--format").arg("text").arg("xyz-does-not-exist");
    let output = run_command(cmd)?;
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No documents match"));
    Ok(())
}

#[test]
fn search_helper_lists_everything_by_category_for_empty_query() -> Result<()> {
    let library = FixtureLibrary::new(vec![
        doc(1, "Motion", "Physics", None),
        doc(2, "Cells", "Biology", None),
    ])?;
    let mut cmd = helper_command("shelf-search", library.root());
    cmd.arg("--format").arg("text");
    let output = run_command(cmd)?;
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["2\tBiology\tCells", "1\tPhysics\tMotion"]);
    Ok(())
}

#[test]
fn check_helper_reports_missing_documents() -> Result<()> {
    let library = FixtureLibrary::new(vec![
        doc(1, "Cells", "Biology", None),
        doc(2, "Motion", "Physics", None),
    ])?;
    library.touch_document("pdfs/cells.pdf")?;

    let mut summary = helper_command("shelf-check", library.root());
    summary.arg("--catalog").arg(library.catalog_path());
    let output = run_command(summary)?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("2 documents in 2 categories"));

    let mut strict = helper_command("shelf-check", library.root());
    strict.arg("--check-files");
    let output = strict.output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pdfs/motion.pdf"));
    assert!(!stderr.contains("pdfs/cells.pdf"));

    library.touch_document("pdfs/motion.pdf")?;
    let mut strict = helper_command("shelf-check", library.root());
    strict.arg("--check-files");
    run_command(strict)?;
    Ok(())
}

#[test]
fn check_helper_rejects_duplicate_ids() -> Result<()> {
    let library = FixtureLibrary::new(vec![
        doc(1, "Cells", "Biology", None),
        doc(1, "Genes", "Biology", None),
    ])?;
    let output = helper_command("shelf-check", library.root()).output()?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate document id 1"));
    Ok(())
}

// Rendering does not deduplicate: the same record authored twice shows twice.
#[test]
fn duplicate_entries_render_separately_without_validation() -> Result<()> {
    let library = FixtureLibrary::new(vec![
        doc(1, "Cells", "Biology", None),
        doc(1, "Cells", "Biology", None),
    ])?;
    let catalog = load_catalog_from_path(&library.catalog_path())?;
    let page = render_page(&LibraryController::new(catalog));
    assert_eq!(page.find_all_by_class("pdf-item").len(), 2);
    Ok(())
}
