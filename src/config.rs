use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::context::{Context, ContextSet};

pub const CONFIG_FILE_NAME: &str = "linux-icons.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Theme to resolve against instead of asking the desktop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Used when the desktop query fails, and consulted after every chain
    #[serde(default = "default_fallback_theme")]
    pub fallback_theme: String,

    #[serde(default = "default_size")]
    pub size: u32,

    #[serde(default = "default_contexts")]
    pub contexts: Vec<Context>,

    /// Also look for `<name>.<ext>` directly inside the search roots
    #[serde(default)]
    pub standalone: bool,

    /// Lifetime of cached theme indexes in seconds (0 disables the cache)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_fallback_theme() -> String {
    "hicolor".to_string()
}

fn default_size() -> u32 {
    22
}

fn default_contexts() -> Vec<Context> {
    vec![Context::Status]
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            fallback_theme: default_fallback_theme(),
            size: default_size(),
            contexts: default_contexts(),
            standalone: false,
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Config {
    /// Loads the config, or the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            bail!("size must be a positive number of pixels");
        }
        if self.contexts.is_empty() {
            bail!("contexts must list at least one context");
        }
        if self.fallback_theme.trim().is_empty() {
            bail!("fallback_theme must not be empty");
        }
        Ok(())
    }

    pub fn context_set(&self) -> Option<ContextSet> {
        ContextSet::new(self.contexts.iter().copied())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn default_template() -> String {
        r#"# linux-icons configuration

# Theme to resolve against. When unset, the desktop's active icon theme is
# queried (gsettings, xfconf-query or kdeglobals).
# theme = "Papirus"

# Used when the desktop query fails, and always consulted last
fallback_theme = "hicolor"

# Default request
size = 22
contexts = ["status"]

# Look for <name>.svg/png/xpm directly inside the search roots
# (e.g. /usr/share/pixmaps) when no theme has the icon
standalone = false

# Seconds a parsed index.theme is reused (0 disables the cache)
cache_ttl_secs = 300
"#
        .to_string()
    }
}
