//! Export a strategy report as a JSON document on disk.
//!
//! The document is the pretty-printed report (2-space indent), field names
//! and list order preserved, saved as `<idea>-strategy-report.json`.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::report::StrategyReport;

pub const FILE_SUFFIX: &str = "-strategy-report.json";

/// Longest idea prefix (in bytes) kept in a file name.
const MAX_STEM_BYTES: usize = 200;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("file name pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encode the whole report as the export document.
pub fn to_document(report: &StrategyReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Decode an export document back into a report.
pub fn from_document(doc: &str) -> Result<StrategyReport, ExportError> {
    Ok(serde_json::from_str(doc)?)
}

/// File name for a report about `idea`.
///
/// Path separators, characters reserved on common filesystems, and control
/// characters become `-`, so the file always lands in the target directory.
pub fn file_name(idea: &str) -> Result<String, ExportError> {
    let unsafe_chars = Regex::new(r#"[/\\:*?"<>|\x00-\x1f\x7f]"#)?;
    let stem = unsafe_chars.replace_all(idea.trim(), "-");

    let mut cut = stem.len().min(MAX_STEM_BYTES);
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }
    Ok(format!("{}{}", &stem[..cut], FILE_SUFFIX))
}

/// Write the report into `dir` and return the full path written.
///
/// Failures are returned to the caller; nothing here touches wizard state.
pub fn write_report(dir: &Path, idea: &str, report: &StrategyReport) -> Result<PathBuf, ExportError> {
    let doc = to_document(report)?;
    let path = dir.join(file_name(idea)?);
    fs::write(&path, doc).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "exported strategy report");
    Ok(path)
}

pub fn read_report(path: &Path) -> Result<StrategyReport, ExportError> {
    let doc = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_document(&doc)
}
