//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level proctor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProctorConfig {
    /// Section codes generated when `--sections` is not given.
    #[serde(default = "default_sections")]
    pub default_sections: Vec<String>,
    /// Directory where reports land when `--output` is a bare file name.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_sections() -> Vec<String> {
    ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./proctor-results")
}

impl Default for ProctorConfig {
    fn default() -> Self {
        Self {
            default_sections: default_sections(),
            output_dir: default_output_dir(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `proctor.toml` in the current directory
/// 2. `~/.config/proctor/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<ProctorConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("proctor.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = global_config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ProctorConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(ProctorConfig::default()),
    }
}

fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("proctor"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_full_battery() {
        let config = ProctorConfig::default();
        assert_eq!(config.default_sections, vec!["A", "B", "C", "D", "E", "F"]);
        assert_eq!(config.output_dir, PathBuf::from("./proctor-results"));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: ProctorConfig = toml::from_str("default_sections = [\"A\", \"F\"]").unwrap();
        assert_eq!(config.default_sections, vec!["A", "F"]);
        assert_eq!(config.output_dir, PathBuf::from("./proctor-results"));
    }

    #[test]
    fn explicit_missing_path_errors() {
        let err = load_config_from(Some(Path::new("/nonexistent/proctor.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proctor.toml");
        std::fs::write(&path, "output_dir = \"/tmp/reports\"").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.default_sections.len(), 6);
    }
}
