use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

/// File name looked up in the base directory.
pub const CONFIG_FILE_NAME: &str = "releasebump.toml";

/// Represents the complete configuration for release-bump.
///
/// Describes which files get rewritten, the copyright holder whose year is refreshed,
/// where private repository links point to once published, and the commit/tag wording.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,

    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,

    #[serde(default)]
    pub links: LinksConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// One class of target files, selected by a glob pattern relative to the base directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TargetConfig {
    pub pattern: String,

    /// Literal label expected in front of the version token (e.g. `"Version "`)
    #[serde(default)]
    pub version_prefix: String,

    /// Run the repository-link pass over this class after the version pass
    #[serde(default)]
    pub rewrite_links: bool,
}

impl TargetConfig {
    pub fn new(pattern: impl Into<String>, version_prefix: impl Into<String>) -> Self {
        TargetConfig {
            pattern: pattern.into(),
            version_prefix: version_prefix.into(),
            rewrite_links: false,
        }
    }

    pub fn with_links(mut self) -> Self {
        self.rewrite_links = true;
        self
    }
}

/// Public location that replaces private SSH repository links.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LinksConfig {
    #[serde(default = "default_public_base")]
    pub public_base: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        LinksConfig {
            public_base: default_public_base(),
        }
    }
}

/// Wording of the release commit and tag. `{version}` is substituted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_tag_name")]
    pub tag_name: String,

    #[serde(default = "default_tag_message")]
    pub tag_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            commit_message: default_commit_message(),
            tag_name: default_tag_name(),
            tag_message: default_tag_message(),
        }
    }
}

impl GitConfig {
    pub fn commit_message_for(&self, version: &str) -> String {
        self.commit_message.replace("{version}", version)
    }

    pub fn tag_name_for(&self, version: &str) -> String {
        self.tag_name.replace("{version}", version)
    }
}

fn default_copyright_holder() -> String {
    "Socket Mobile, Inc.".to_string()
}

fn default_targets() -> Vec<TargetConfig> {
    vec![
        TargetConfig::new("README.md", "Version "),
        TargetConfig::new("*.podspec", "").with_links(),
    ]
}

fn default_public_base() -> String {
    "https://github.com/SocketMobile".to_string()
}

fn default_commit_message() -> String {
    "update to version {version}".to_string()
}

fn default_tag_name() -> String {
    "{version}".to_string()
}

fn default_tag_message() -> String {
    "update version".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            copyright_holder: default_copyright_holder(),
            targets: default_targets(),
            links: LinksConfig::default(),
            git: GitConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasebump.toml` in the base directory
/// 3. `.releasebump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, base_dir: &Path) -> Result<Config> {
    let local = base_dir.join(CONFIG_FILE_NAME);

    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if local.is_file() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.is_file() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    log::debug!("loading configuration from {}", path.display());
    let config_str =
        fs::read_to_string(&path).map_err(|e| ReleaseError::file("read", &path, e))?;
    parse_config(&config_str)
}

/// Parses a TOML configuration document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))?;

    if config.targets.iter().any(|t| t.pattern.trim().is_empty()) {
        return Err(ReleaseError::config("target pattern must not be empty"));
    }

    Ok(config)
}
