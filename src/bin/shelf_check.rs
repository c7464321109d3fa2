//! Authoring-time catalog check.
//!
//! Runs the strict catalog load (schema, version, unique ids, required
//! strings), prints a per-category summary, and with `--check-files` fails when
//! any local document path does not resolve to a file.

use anyhow::{Result, anyhow, bail};
use shelfview::{CatalogIndex, document_base_dir, resolve_catalog_path};
use std::env;
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

    println!(
        "{}: {} documents in {} categories",
        catalog_path.display(),
        index.catalog().len(),
        index.categories().len()
    );
    for (category, count) in index.category_counts() {
        println!("  {category}\t{count}");
    }

    if args.check_files {
        let base = args
            .base
            .clone()
            .unwrap_or_else(|| document_base_dir(&catalog_path));
        let missing = index.missing_documents(&base);
        if !missing.is_empty() {
            let details = missing
                .iter()
                .map(|doc| format!("  {} ({}): {}", doc.id, doc.title, doc.path))
                .collect::<Vec<_>>()
                .join("\n");
            bail!(
                "{} document(s) missing under {}:\n{}",
                missing.len(),
                base.display(),
                details
            );
        }
        println!("all document paths resolve under {}", base.display());
    }
    Ok(())
}

struct CliArgs {
    catalog: Option<PathBuf>,
    base: Option<PathBuf>,
    check_files: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut config = CliArgs {
            catalog: None,
            base: None,
            check_files: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--catalog requires a path"))?;
                    config.catalog = Some(PathBuf::from(value));
                }
                "--base" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--base requires a directory"))?;
                    config.base = Some(PathBuf::from(value));
                }
                "--check-files" => config.check_files = true,
                "--help" | "-h" => usage(0),
                other => bail!("Unknown argument: {other}"),
            }
        }

        Ok(config)
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: shelf-check [--catalog PATH] [--check-files] [--base DIR]\n\nValidates the catalog and prints a category summary.\n  --check-files   Fail when a local document path does not resolve to a file.\n  --base DIR      Directory document paths resolve against (default: the library root)."
    );
    std::process::exit(code);
}
