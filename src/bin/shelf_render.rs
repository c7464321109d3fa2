//! Render the library page to static HTML.
//!
//! Loads and validates the catalog, replays the requested UI state (query,
//! expanded sections, open document) through `LibraryController`, and writes
//! the resulting page to a file or stdout.

use anyhow::{Context, Result, anyhow, bail};
use log::info;
use shelfview::{
    CatalogIndex, CategoryName, DocumentId, LibraryController, render_document,
    resolve_catalog_path, split_list,
};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let catalog_path = resolve_catalog_path(args.catalog.as_deref())?;
    let index = CatalogIndex::load(&catalog_path)?;
    let mut controller = LibraryController::new(index.into_catalog());

    for name in &args.expand {
        let category = CategoryName::new(name.as_str());
        if controller.is_expanded(&category) {
            continue;
        }
        controller
            .toggle_section(&category)
            .ok_or_else(|| anyhow!("unknown category '{name}' passed to --expand"))?;
    }

    if let Some(query) = &args.query {
        controller.input_query(query.as_str());
    }

    if let Some(id) = args.view {
        if controller.view_document(id).is_none() {
            bail!("no document with id {id} in {}", catalog_path.display());
        }
    }

    let html = render_document(&controller);
    match &args.out {
        Some(path) => {
            fs::write(path, &html).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} ({} bytes)", path.display(), html.len());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("writing page to stdout")?;
        }
    }
    Ok(())
}

struct CliArgs {
    catalog: Option<PathBuf>,
    out: Option<PathBuf>,
    query: Option<String>,
    expand: Vec<String>,
    view: Option<DocumentId>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut config = CliArgs {
            catalog: None,
            out: None,
            query: None,
            expand: Vec::new(),
            view: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    config.catalog = Some(PathBuf::from(next_value(&mut args, &arg)?));
                }
                "--out" | "-o" => {
                    config.out = Some(PathBuf::from(next_value(&mut args, &arg)?));
                }
                "--query" | "-q" => config.query = Some(next_value(&mut args, &arg)?),
                "--expand" => {
                    let value = next_value(&mut args, &arg)?;
                    config.expand.extend(split_list(&value));
                }
                "--view" => {
                    let raw = next_value(&mut args, &arg)?;
                    let id = raw.parse::<u64>().with_context(|| {
                        format!("--view expects a numeric document id, got '{raw}'")
                    })?;
                    config.view = Some(DocumentId(id));
                }
                "--help" | "-h" => usage(0),
                other => bail!("Unknown argument: {other}"),
            }
        }

        Ok(config)
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| anyhow!("{flag} requires a value"))
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: shelf-render [--catalog PATH] [--out PATH] [--query TEXT] [--expand LIST] [--view ID]\n\nOptions:\n  --catalog PATH   Catalog to render (default: SHELF_CATALOG, then <library root>/data/library.json).\n  --out, -o PATH   Write the page here instead of stdout.\n  --query, -q TEXT Render with this search text applied.\n  --expand LIST    Comma- or space-separated categories to render expanded.\n  --view ID        Render with the document preview open on this id."
    );
    std::process::exit(code);
}
