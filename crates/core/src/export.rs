use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{error::Result, types::VideoRow};

const FALLBACK_STEM: &str = "results";

/// Directory used by `--save` when no directory is given.
pub fn default_export_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytharvest")
}

/// Turns free text into a safe file stem: drops `<>:"/\|?*`, turns spaces
/// into underscores and keeps only alphanumerics, `_` and `-`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-'))
        .collect()
}

/// `<dir>/<sanitized query>.json`
pub fn export_path(dir: &Path, query: &str) -> PathBuf {
    let stem = sanitize_filename(query);
    let stem = if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    };
    dir.join(format!("{stem}.json"))
}

/// Write rows to a file as pretty JSON, creating the parent directory.
pub async fn save_rows(rows: &[VideoRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let pretty_json = serde_json::to_string_pretty(rows)?;
    fs::write(path, &pretty_json).await?;
    tracing::info!(path = %path.display(), rows = rows.len(), "rows saved");
    Ok(())
}
