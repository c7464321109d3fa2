use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "shelf-render" => env!("CARGO_BIN_EXE_shelf-render"),
        "shelf-search" => env!("CARGO_BIN_EXE_shelf-search"),
        "shelf-check" => env!("CARGO_BIN_EXE_shelf-check"),
        other => panic!("unknown helper {other}"),
    };
    PathBuf::from(path)
}

/// Command for a helper with library-root discovery pinned to `root`.
pub fn helper_command(name: &str, root: &Path) -> Command {
    let mut cmd = Command::new(helper_binary(name));
    cmd.env("SHELF_ROOT", root).env_remove("SHELF_CATALOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn doc(id: u64, title: &str, category: &str, description: Option<&str>) -> Value {
    let slug = title.to_lowercase().replace(' ', "-");
    let mut value = json!({
        "id": id,
        "title": title,
        "category": category,
        "filename": format!("{slug}.pdf"),
        "path": format!("pdfs/{slug}.pdf"),
    });
    if let Some(description) = description {
        value["description"] = Value::String(description.to_string());
    }
    value
}

/// A throwaway library root: `data/library.json` plus a copy of the schema.
pub struct FixtureLibrary {
    pub dir: TempDir,
}

impl FixtureLibrary {
    pub fn new(documents: Vec<Value>) -> Result<Self> {
        let dir = TempDir::new().context("allocating fixture library")?;
        std::fs::create_dir_all(dir.path().join("data"))?;
        std::fs::create_dir_all(dir.path().join("schema"))?;
        std::fs::copy(
            repo_root().join("schema/catalog.schema.json"),
            dir.path().join("schema/catalog.schema.json"),
        )?;
        let catalog = json!({
            "schema_version": "shelf_catalog_v1",
            "title": "Fixture Library",
            "documents": documents,
        });
        std::fs::write(
            dir.path().join("data/library.json"),
            serde_json::to_vec_pretty(&catalog)?,
        )?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.dir.path().join("data/library.json")
    }

    pub fn touch_document(&self, relative: &str) -> Result<()> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, b"%PDF-1.4\n")?;
        Ok(())
    }
}
