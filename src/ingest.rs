//! Document lifecycle commands: import, update, export, delete, status.
//!
//! Every write goes through [`store`], which paginates and fingerprints
//! the full text. `update` also runs the auto-save check and, when an
//! export directory is configured, writes a copy of a document that has
//! crossed the word threshold.

use anyhow::{bail, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::autosave;
use crate::config::Config;
use crate::db;
use crate::export::{export_text, ExportCommand};
use crate::import::{self, ImportCommand};
use crate::store;

pub async fn run_import(config: &Config, path: &Path, name: Option<String>) -> Result<()> {
    if path.is_dir() {
        if name.is_some() {
            bail!("--name cannot be used when importing a directory");
        }
        return import_directory(config, path).await;
    }

    let text = import::import_file(path, &config.import)?;
    let name = name.unwrap_or_else(|| display_name(path));

    let pool = db::connect(config).await?;
    let summary = store::create_document(&pool, &name, &text).await?;
    pool.close().await;

    println!("imported {}", summary.name);
    println!("  id: {}", summary.id);
    println!("  pages: {}", summary.page_count);
    println!("  words: {}", summary.word_count);
    println!("  hash: {}", summary.content_hash);
    Ok(())
}

/// Import every allowed file under `root`. Unreadable files are skipped.
async fn import_directory(config: &Config, root: &Path) -> Result<()> {
    let files = import::collect_importable(root, &config.import)?;
    let pool = db::connect(config).await?;

    let mut imported = 0u64;
    let mut skipped = 0u64;
    for file in &files {
        let mut cmd = ImportCommand::new(file, &config.import);
        if !cmd.execute() {
            warn!(path = %file.display(), "skipping file");
            skipped += 1;
            continue;
        }
        let summary = store::create_document(&pool, &display_name(file), cmd.result()).await?;
        println!("  {} {} ({} pages)", summary.id, summary.name, summary.page_count);
        imported += 1;
    }
    pool.close().await;

    println!("import {}", root.display());
    println!("  files found: {}", files.len());
    println!("  imported: {}", imported);
    println!("  skipped: {}", skipped);
    println!("ok");
    Ok(())
}

pub async fn run_update(config: &Config, id: &str, path: &Path) -> Result<()> {
    let text = import::import_file(path, &config.import)?;

    let pool = db::connect(config).await?;
    let changed = store::update_document(&pool, id, &text).await?;
    pool.close().await;

    println!("{}", if changed { "updated" } else { "unchanged" });

    if changed && autosave::should_autosave(&text, config.autosave.word_threshold) {
        info!(
            id,
            words = autosave::count_words(&text),
            threshold = config.autosave.word_threshold,
            "auto-save threshold exceeded"
        );
        if let Some(dir) = &config.autosave.export_dir {
            let mut cmd = ExportCommand::new(dir.join(format!("{}.txt", id)), text);
            if cmd.execute() {
                println!("{}", cmd.result());
            } else {
                warn!(id, "auto-save export failed");
            }
        }
    }
    Ok(())
}

pub async fn run_export(config: &Config, id: &str, path: &Path) -> Result<()> {
    let pool = db::connect(config).await?;
    let text = store::document_text(&pool, id).await?;
    pool.close().await;

    let Some(text) = text else {
        bail!("document not found: {}", id);
    };

    export_text(path, &text)?;
    println!("File exported successfully to: {}", path.display());
    Ok(())
}

pub async fn run_delete(config: &Config, id: &str) -> Result<()> {
    let pool = db::connect(config).await?;
    let deleted = store::delete_document(&pool, id).await?;
    pool.close().await;

    if !deleted {
        bail!("document not found: {}", id);
    }
    println!("deleted {}", id);
    Ok(())
}

/// Report whether the file at `path` differs from the stored document.
pub async fn run_status(config: &Config, id: &str, path: &Path) -> Result<()> {
    let text = import::import_file(path, &config.import)?;

    let pool = db::connect(config).await?;
    let changed = store::has_changed(&pool, id, &text).await?;
    pool.close().await;

    match changed {
        Some(true) => println!("changed"),
        Some(false) => println!("unchanged"),
        None => bail!("document not found: {}", id),
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
