use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "capex.toml";

/// Configuration for the local host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// File backing the world state.
    pub state_path: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Indent JSON output.
    pub pretty_json: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("capex-state.json"),
            log_filter: "warn".into(),
            pretty_json: true,
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("invalid host configuration")
    }

    /// Load `path`, or `capex.toml` from the working directory if present,
    /// or fall back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = HostConfig::default();
        assert_eq!(c.state_path, PathBuf::from("capex-state.json"));
        assert_eq!(c.log_filter, "warn");
        assert!(c.pretty_json);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = HostConfig::from_toml_str("state_path = \"/var/lib/capex/state.json\"").unwrap();
        assert_eq!(c.state_path, PathBuf::from("/var/lib/capex/state.json"));
        assert_eq!(c.log_filter, "warn");
    }

    #[test]
    fn full_toml() {
        let c = HostConfig::from_toml_str(
            "state_path = \"s.json\"\nlog_filter = \"capex_contract=debug\"\npretty_json = false\n",
        )
        .unwrap();
        assert_eq!(c.log_filter, "capex_contract=debug");
        assert!(!c.pretty_json);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(HostConfig::from_toml_str("pretty_json = \"yes\"").is_err());
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");
        fs::write(&path, "log_filter = \"info\"").unwrap();
        let c = HostConfig::load(Some(&path)).unwrap();
        assert_eq!(c.log_filter, "info");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = HostConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
