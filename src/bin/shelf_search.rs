//! Run the library search from the command line.
//!
//! Applies the same predicate as the page (trimmed, case-insensitive substring
//! over title, category and description) and prints matches in catalog order,
//! either as NDJSON records or as tab-separated text. An empty query lists the
//! whole catalog section by section, like the page's category view.

use anyhow::{Context, Result, anyhow, bail};
use shelfview::{
    Catalog, CatalogIndex, DocumentRecord, Panel, group_by_category, resolve_catalog_path,
    search,
};
use std::env;
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
    let catalog = CatalogIndex::load(&catalog_path)?.into_catalog();

    let documents = match search(&catalog, &args.query) {
        Panel::Categories => all_by_category(&catalog),
        Panel::Results(documents) => documents,
        Panel::NoResults => {
            eprintln!("No documents match '{}'", args.query.trim());
            return Ok(());
        }
    };

    let mut stdout = io::stdout().lock();
    for doc in &documents {
        match args.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut stdout, doc).context("serializing document")?;
                writeln!(stdout)?;
            }
            OutputFormat::Text => {
                writeln!(stdout, "{}\t{}\t{}", doc.id, doc.category, doc.title)?;
            }
        }
    }
    Ok(())
}

fn all_by_category(catalog: &Catalog) -> Vec<DocumentRecord> {
    group_by_category(catalog)
        .into_iter()
        .flat_map(|group| group.documents)
        .collect()
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "json" | "ndjson" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => bail!("unknown format '{other}' (expected json|text)"),
        }
    }
}

struct CliArgs {
    catalog: Option<PathBuf>,
    format: OutputFormat,
    query: String,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut catalog = None;
        let mut format = OutputFormat::Json;
        let mut terms: Vec<String> = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--catalog requires a path"))?;
                    catalog = Some(PathBuf::from(value));
                }
                "--format" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--format requires json|text"))?;
                    format = OutputFormat::from_str(&value)?;
                }
                "--help" | "-h" => usage(0),
                "--" => terms.extend(args.by_ref()),
                other if other.starts_with("--") => bail!("Unknown argument: {other}"),
                _ => terms.push(arg),
            }
        }

        Ok(Self {
            catalog,
            format,
            query: terms.join(" "),
        })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: shelf-search [--catalog PATH] [--format json|text] [--] QUERY...\n\nPrints documents whose title, category or description contains QUERY\n(case-insensitive). json emits one record per line; text emits\nid<TAB>category<TAB>title. An empty QUERY lists every document by category."
    );
    std::process::exit(code);
}
