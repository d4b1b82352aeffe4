use anyhow::{bail, Context, Result};
use omnistrat_core::{Synthesizer, TemplateSynthesizer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::remote::RemoteSynthesizer;
use crate::state::ensure_omnistrat_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub synthesis: SynthesisSection,
    pub export: ExportSection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Built-in template synthesizer.
    #[default]
    Template,
    /// POST (idea, businessModel) to `endpoint`, expect a report document back.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSection {
    pub backend: Backend,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SynthesisSection {
    fn default() -> Self {
        Self {
            backend: Backend::Template,
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory exported reports are written to.
    pub dir: PathBuf,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Build the synthesizer selected by `[synthesis]`.
    pub fn synthesizer(&self) -> Result<Box<dyn Synthesizer>> {
        match self.synthesis.backend {
            Backend::Template => Ok(Box::new(TemplateSynthesizer)),
            Backend::Remote => {
                let Some(endpoint) = self.synthesis.endpoint.as_deref().filter(|e| !e.trim().is_empty()) else {
                    bail!("synthesis.backend = \"remote\" requires synthesis.endpoint");
                };
                if self.synthesis.timeout_secs == 0 {
                    bail!("synthesis.timeout_secs must be greater than 0");
                }
                let remote = RemoteSynthesizer::new(
                    endpoint,
                    Duration::from_secs(self.synthesis.timeout_secs),
                )?;
                Ok(Box::new(remote))
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_omnistrat_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    let source = if p.exists() { p.display().to_string() } else { "defaults".to_string() };
    println!("# source: {source}");
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.synthesis.backend, Backend::Template);
        assert_eq!(cfg.synthesis.timeout_secs, 30);
        assert_eq!(cfg.export.dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let cfg = parse_config(
            r#"
            [synthesis]
            backend = "remote"
            endpoint = "http://127.0.0.1:9000/strategy"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.synthesis.backend, Backend::Remote);
        assert_eq!(cfg.synthesis.endpoint.as_deref(), Some("http://127.0.0.1:9000/strategy"));
        assert_eq!(cfg.synthesis.timeout_secs, 30);
        assert_eq!(cfg.export, ExportSection::default());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(parse_config("[synthesis]\nbackend = \"gpt\"\n").is_err());
    }

    #[test]
    fn test_remote_without_endpoint_fails() {
        let mut cfg = Config::default();
        cfg.synthesis.backend = Backend::Remote;
        let err = cfg.synthesizer().err().unwrap();
        assert!(err.to_string().contains("requires synthesis.endpoint"));
    }

    #[test]
    fn test_template_backend_builds() {
        assert!(Config::default().synthesizer().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_serialized_default_parses_back() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }
}
