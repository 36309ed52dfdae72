//! Export document text to a file.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Write `content` to `path` verbatim, creating parent directories and
/// overwriting any existing file.
pub fn export_text(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        bail!("Export path is empty");
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), bytes = content.len(), "text exported");
    Ok(())
}

/// Boolean-outcome wrapper around [`export_text`].
#[derive(Debug, Clone)]
pub struct ExportCommand {
    path: PathBuf,
    content: String,
    success: bool,
}

impl ExportCommand {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            success: false,
        }
    }

    pub fn execute(&mut self) -> bool {
        self.success = match export_text(&self.path, &self.content) {
            Ok(()) => true,
            Err(e) => {
                warn!("export failed: {:#}", e);
                false
            }
        };
        self.success
    }

    pub fn result(&self) -> String {
        if self.success {
            format!("File exported successfully to: {}", self.path.display())
        } else {
            "Export failed".to_string()
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}
