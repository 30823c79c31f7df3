//! CLI configuration — tool paths and dry-run settings.
//!
//! Loaded from a TOML file (`--config`, then the search paths below), with
//! `ZDEVCTL_*` environment variables overriding file values and CLI flags
//! overriding both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level zdevctl configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZdevctlConfig {
    /// External tool locations.
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Dry-run behavior.
    #[serde(default)]
    pub dry_run: DryRunConfig,
}

/// Paths of the external device tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Enumeration tool.
    #[serde(default = "default_lszdev")]
    pub lszdev: String,
    /// Activation tool.
    #[serde(default = "default_chzdev")]
    pub chzdev: String,
}

/// Dry-run settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DryRunConfig {
    /// Simulate activation instead of running the real tools.
    #[serde(default)]
    pub enabled: bool,
    /// Pairs file that seeds the simulated inventory.
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

impl ZdevctlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from the first existing search path, or defaults if none.
    /// An explicitly named file must load; search-path files are optional.
    pub fn load(explicit: Option<&Path>) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        for path in Self::search_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Configuration file search paths, in precedence order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(path) = std::env::var("ZDEVCTL_CONFIG") {
            paths.push(PathBuf::from(path));
        }
        paths.push(PathBuf::from("zdevctl.toml"));
        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/zdevctl/config.toml"));
        }
        paths.push(PathBuf::from("/etc/zdevctl/config.toml"));
        paths
    }

    /// Apply `ZDEVCTL_*` environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(lszdev) = std::env::var("ZDEVCTL_LSZDEV") {
            self.tools.lszdev = lszdev;
        }
        if let Ok(chzdev) = std::env::var("ZDEVCTL_CHZDEV") {
            self.tools.chzdev = chzdev;
        }
        if let Ok(dry_run) = std::env::var("ZDEVCTL_DRY_RUN") {
            self.dry_run.enabled = matches!(dry_run.as_str(), "1" | "true" | "yes");
        }
        if let Ok(snapshot) = std::env::var("ZDEVCTL_SNAPSHOT") {
            self.dry_run.snapshot_path = Some(snapshot);
        }
    }

    /// Environment variables recognized by `apply_env_overrides`, with
    /// descriptions for `config paths`.
    pub fn env_vars() -> &'static [(&'static str, &'static str)] {
        &[
            ("ZDEVCTL_CONFIG", "configuration file path"),
            ("ZDEVCTL_LSZDEV", "enumeration tool path"),
            ("ZDEVCTL_CHZDEV", "activation tool path"),
            ("ZDEVCTL_DRY_RUN", "simulate activation (1/true/yes)"),
            ("ZDEVCTL_SNAPSHOT", "dry-run seed snapshot path"),
        ]
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            lszdev: default_lszdev(),
            chzdev: default_chzdev(),
        }
    }
}

fn default_lszdev() -> String {
    "lszdev".to_string()
}

fn default_chzdev() -> String {
    "chzdev".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ZdevctlConfig::default();
        assert_eq!(config.tools.lszdev, "lszdev");
        assert_eq!(config.tools.chzdev, "chzdev");
        assert!(!config.dry_run.enabled);
        assert!(config.dry_run.snapshot_path.is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[tools]
lszdev = "/usr/sbin/lszdev"
chzdev = "/usr/sbin/chzdev"

[dry_run]
enabled = true
snapshot_path = "/var/lib/zdevctl/devices.pairs"
"#;
        let config: ZdevctlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tools.lszdev, "/usr/sbin/lszdev");
        assert_eq!(config.tools.chzdev, "/usr/sbin/chzdev");
        assert!(config.dry_run.enabled);
        assert_eq!(
            config.dry_run.snapshot_path.as_deref(),
            Some("/var/lib/zdevctl/devices.pairs")
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ZdevctlConfig = toml::from_str("[dry_run]\nenabled = true\n").unwrap();
        assert_eq!(config.tools.lszdev, "lszdev");
        assert!(config.dry_run.enabled);
    }
}
