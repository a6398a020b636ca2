//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treekit/treekit.toml`
//! 3. Local config: `<dir>/.treekit.toml` (`-C <dir>` or the current directory)
//! 4. Environment variables: `TREEKIT_*` prefix, `__` between sections
//!
//! Every layer replaces what it specifies; lists are never merged.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Sample tree used by `demo` and as default expression.
pub const DEFAULT_SAMPLE: &str = "Branch(Branch(Leaf+Leaf)+Branch(Leaf))";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Tree expression in composed-label notation
    pub sample: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            sample: DEFAULT_SAMPLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VisitorConfig {
    /// One evaluator instance per label
    pub labels: Vec<String>,
}

impl Default for VisitorConfig {
    fn default() -> Self {
        Self {
            labels: vec!["KindLabeler1".into(), "KindLabeler2".into()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IteratorConfig {
    /// Items of the demo collection, in insertion order
    pub items: Vec<String>,
    /// Start in reverse direction
    pub reverse: bool,
}

impl Default for IteratorConfig {
    fn default() -> Self {
        Self {
            items: vec!["First".into(), "Second".into(), "Third".into()],
            reverse: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree: RawTreeConfig,
    pub visitor: RawVisitorConfig,
    pub iterator: RawIteratorConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeConfig {
    pub sample: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawVisitorConfig {
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawIteratorConfig {
    pub items: Option<Vec<String>>,
    pub reverse: Option<bool>,
}

/// Unified configuration for treekit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub tree: TreeConfig,
    pub visitor: VisitorConfig,
    pub iterator: IteratorConfig,
}

/// Get the XDG config directory for treekit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treekit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treekit.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".treekit.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree: TreeConfig {
                sample: overlay
                    .tree
                    .sample
                    .clone()
                    .unwrap_or_else(|| self.tree.sample.clone()),
            },
            visitor: VisitorConfig {
                labels: overlay
                    .visitor
                    .labels
                    .clone()
                    .unwrap_or_else(|| self.visitor.labels.clone()),
            },
            iterator: IteratorConfig {
                items: overlay
                    .iterator
                    .items
                    .clone()
                    .unwrap_or_else(|| self.iterator.items.clone()),
                reverse: overlay.iterator.reverse.unwrap_or(self.iterator.reverse),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory holding `.treekit.toml`; the current
    ///   directory is not consulted when `None`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply TREEKIT_* environment variables as explicit overrides.
    ///
    /// `TREEKIT_ITERATOR__ITEMS` is a comma separated list.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREEKIT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree.sample") {
            settings.tree.sample = val;
        }
        if let Ok(val) = config.get_string("visitor.labels") {
            settings.visitor.labels = split_list(&val);
        }
        if let Ok(val) = config.get_string("iterator.items") {
            settings.iterator.items = split_list(&val);
        }
        if let Ok(val) = config.get_bool("iterator.reverse") {
            settings.iterator.reverse = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treekit configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treekit/treekit.toml
#   Local:  ./.treekit.toml
#   Env:    TREEKIT_* environment variables, e.g. TREEKIT_ITERATOR__ITEMS=a,b,c

[tree]
# Tree expression used by `demo` and when no expression is given
# sample = "Branch(Branch(Leaf+Leaf)+Branch(Leaf))"

[visitor]
# One evaluator per label, each run over the sample tree
# labels = ["KindLabeler1", "KindLabeler2"]

[iterator]
# Collection walked by `iter` and `demo`
# items = ["First", "Second", "Third"]
# reverse = false
"#
        .to_string()
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_has_demo_values() {
        let settings = Settings::default();
        assert_eq!(settings.tree.sample, DEFAULT_SAMPLE);
        assert_eq!(settings.iterator.items, vec!["First", "Second", "Third"]);
        assert!(!settings.iterator.reverse);
        assert_eq!(settings.visitor.labels.len(), 2);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_kept() {
        let base = Settings::default();
        let overlay = RawSettings {
            iterator: RawIteratorConfig {
                items: Some(vec!["x".into()]),
                reverse: None,
            },
            ..Default::default()
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.iterator.items, vec!["x"]);
        assert!(!result.iterator.reverse);
        assert_eq!(result.tree, base.tree);
        assert_eq!(result.visitor, base.visitor);
    }

    #[test]
    fn given_empty_list_overlay_when_merging_then_replaces_with_empty() {
        let overlay = RawSettings {
            visitor: RawVisitorConfig {
                labels: Some(vec![]),
            },
            ..Default::default()
        };
        let result = Settings::default().merge_with(&overlay);
        assert!(result.visitor.labels.is_empty());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn given_settings_when_to_toml_then_parses_back() {
        let toml_str = Settings::default().to_toml().unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }
}
