use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `~/.omnistrat`, or `$OMNISTRAT_HOME` when set.
pub fn omnistrat_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("OMNISTRAT_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".omnistrat"))
}

pub fn ensure_omnistrat_home() -> Result<PathBuf> {
    let dir = omnistrat_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
