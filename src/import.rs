//! Import text files into memory.
//!
//! Only files whose extension is on the configured allow list are read.
//! Content is read line by line and every line is re-terminated with
//! `\n`, so CRLF input comes back as LF.

use anyhow::{bail, Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ImportConfig;

/// Read `path` as text if its extension is allowed.
pub fn import_file(path: &Path, config: &ImportConfig) -> Result<String> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if file_name.trim().is_empty() {
        bail!("Import path has no file name: {}", path.display());
    }

    let extension = file_extension(&file_name);
    if !config.allows(extension) {
        bail!(
            "Unsupported file type '{}': expected one of {}",
            file_name,
            config.extensions.join(", ")
        );
    }

    let content = read_normalized(path)?;
    debug!(path = %path.display(), bytes = content.len(), "file imported");
    Ok(content)
}

/// Read `path` line by line, terminating every line with `\n`.
///
/// This is the text that gets paginated and fingerprinted on import, so
/// anything that hashes or paginates a file for comparison with a stored
/// document must read it through here.
pub fn read_normalized(path: &Path) -> Result<String> {
    if !path.is_file() {
        bail!("File does not exist: {}", path.display());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut content = String::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        content.push_str(&line);
        content.push('\n');
    }
    Ok(content)
}

/// Text after the last `.` of `file_name`, or `""` when there is none.
fn file_extension(file_name: &str) -> &str {
    file_name
        .rfind('.')
        .map(|i| &file_name[i + 1..])
        .unwrap_or("")
}

/// Walk `root` and return importable files, sorted by path.
pub fn collect_importable(root: &Path, config: &ImportConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("Import root is not a directory: {}", root.display());
    }

    let include_set = build_extension_globset(&config.extensions)?;
    let exclude_set = build_globset(&["**/.git/**", "**/target/**", "**/node_modules/**"])?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

fn build_extension_globset(extensions: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        builder.add(
            GlobBuilder::new(&format!("**/*.{}", ext))
                .case_insensitive(true)
                .build()?,
        );
    }
    Ok(builder.build()?)
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern).build()?);
    }
    Ok(builder.build()?)
}

/// Boolean-outcome wrapper around [`import_file`].
#[derive(Debug, Clone)]
pub struct ImportCommand {
    path: PathBuf,
    config: ImportConfig,
    content: String,
    success: bool,
}

impl ImportCommand {
    pub fn new(path: impl Into<PathBuf>, config: &ImportConfig) -> Self {
        Self {
            path: path.into(),
            config: config.clone(),
            content: String::new(),
            success: false,
        }
    }

    pub fn execute(&mut self) -> bool {
        match import_file(&self.path, &self.config) {
            Ok(content) => {
                self.content = content;
                self.success = true;
            }
            Err(e) => {
                warn!("import failed: {:#}", e);
                self.content.clear();
                self.success = false;
            }
        }
        self.success
    }

    /// Imported text; empty unless the last execution succeeded.
    pub fn result(&self) -> &str {
        &self.content
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
