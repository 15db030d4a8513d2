use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Represents the complete configuration for git-sv.
///
/// Contains tag naming/filtering and conventional commit settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub commit_message: CommitMessageConfig,
}

/// Which refs count as release tags and how new tags are named.
///
/// `pattern` is a printf-style template with three `%d` slots filled with
/// major, minor and patch, in that order.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,

    #[serde(default)]
    pub filter: String,
}

fn default_tag_pattern() -> String {
    "%d.%d.%d".to_string()
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
            filter: String::new(),
        }
    }
}

impl TagConfig {
    pub fn new(pattern: impl Into<String>, filter: impl Into<String>) -> Self {
        TagConfig {
            pattern: pattern.into(),
            filter: filter.into(),
        }
    }

    /// Formats a tag name from version components.
    ///
    /// # Example
    /// ```
    /// # use git_sv::config::TagConfig;
    /// let cfg = TagConfig::new("v%d.%d.%d", "v*");
    /// assert_eq!(cfg.format_tag(1, 2, 3), "v1.2.3");
    /// ```
    pub fn format_tag(&self, major: u64, minor: u64, patch: u64) -> String {
        let mut values = [major, minor, patch].into_iter();
        let mut parts = self.pattern.split("%d");
        let mut tag = parts.next().unwrap_or_default().to_string();
        for part in parts {
            match values.next() {
                Some(value) => tag.push_str(&value.to_string()),
                None => tag.push_str("%d"),
            }
            tag.push_str(part);
        }
        tag
    }

    /// Ref pattern handed to `git for-each-ref`.
    pub fn ref_pattern(&self) -> String {
        format!("refs/tags/{}", self.filter)
    }
}

/// Returns the default list of conventional commit types.
fn default_commit_types() -> Vec<String> {
    vec![
        "feat".to_string(),
        "fix".to_string(),
        "docs".to_string(),
        "style".to_string(),
        "refactor".to_string(),
        "test".to_string(),
        "chore".to_string(),
        "build".to_string(),
        "ci".to_string(),
        "perf".to_string(),
        "revert".to_string(),
    ]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

/// Configuration for conventional commit parsing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitMessageConfig {
    #[serde(default = "default_commit_types")]
    pub types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,
}

impl Default for CommitMessageConfig {
    fn default() -> Self {
        CommitMessageConfig {
            types: default_commit_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitsv.toml` in current directory
/// 3. `.gitsv.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitsv.toml").exists() {
        fs::read_to_string("./gitsv.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitsv.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
