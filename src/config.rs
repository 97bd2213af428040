//! Site configuration module.
//!
//! Handles loading and validating `site.toml` from the project root. The file
//! declares the site URL, its base path, and every content collection:
//!
//! ```toml
//! site = "https://example.com"
//! base = "/"
//!
//! [collections.work]
//! kind = "markdown"
//! base = "src/content/work"
//! pattern = "**/*.md"
//!
//! [collections.celebrities]
//! kind = "gallery"
//! base_dir = "public/assets/celebrities"
//! json_path = "src/content/celebrities/celebrities.json"
//! json_key = "highlighted"
//! has_subfolders = true
//! ```
//!
//! Paths are relative to the project root. A missing `site.toml` is not an
//! error: the defaults describe a site with no collections.
//!
//! Unknown keys are rejected to catch typos early.

use crate::gallery::GalleryConfig;
use crate::markdown::{DEFAULT_PATTERN, MarkdownConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Public URL of the deployed site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Base path the site is served from.
    pub base: String,
    /// Content collections by name.
    pub collections: BTreeMap<String, CollectionConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: None,
            base: "/".to_string(),
            collections: BTreeMap::new(),
        }
    }
}

/// How one collection is loaded, selected by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CollectionConfig {
    Markdown(MarkdownCollectionConfig),
    Gallery(GalleryCollectionConfig),
}

/// A collection of markdown files with frontmatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownCollectionConfig {
    /// Directory searched for entries.
    pub base: String,
    /// Glob matched against paths relative to `base`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl MarkdownCollectionConfig {
    pub fn to_markdown_config(&self) -> MarkdownConfig {
        MarkdownConfig::new(&self.base).with_pattern(&self.pattern)
    }
}

/// A collection of media folders plus a metadata JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryCollectionConfig {
    /// Directory with one subfolder per entry.
    pub base_dir: String,
    /// Metadata JSON file.
    pub json_path: String,
    /// Key the metadata records are nested under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_key: Option<String>,
    /// Entries are subfolders (default) or individual files.
    #[serde(default = "default_true")]
    pub has_subfolders: bool,
    /// Prefix for generated asset URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
}

fn default_true() -> bool {
    true
}

impl GalleryCollectionConfig {
    pub fn to_gallery_config(&self) -> GalleryConfig {
        let mut config = GalleryConfig::new(&self.base_dir, &self.json_path)
            .with_subfolders(self.has_subfolders);
        if let Some(key) = &self.json_key {
            config = config.with_json_key(key);
        }
        if let Some(base_path) = &self.base_path {
            config = config.with_base_path(base_path);
        }
        config
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base.starts_with('/') {
            return Err(ConfigError::Validation("base must start with '/'".into()));
        }
        for (name, collection) in &self.collections {
            if name.is_empty()
                || !name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(ConfigError::Validation(format!(
                    "collection name '{name}' may only contain letters, digits, '-' and '_'"
                )));
            }
            match collection {
                CollectionConfig::Gallery(g) => {
                    if g.base_dir.is_empty() || g.json_path.is_empty() {
                        return Err(ConfigError::Validation(format!(
                            "collections.{name}: base_dir and json_path must not be empty"
                        )));
                    }
                }
                CollectionConfig::Markdown(m) => {
                    if m.base.is_empty() {
                        return Err(ConfigError::Validation(format!(
                            "collections.{name}: base must not be empty"
                        )));
                    }
                    if let Err(e) = glob::Pattern::new(&m.pattern) {
                        return Err(ConfigError::Validation(format!(
                            "collections.{name}: invalid pattern '{}': {e}",
                            m.pattern
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `site.toml` from the project root.
///
/// Returns the default config if the file doesn't exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `site.toml` for a photography portfolio.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Portfolio site configuration
# =============================
# Paths are relative to the project root (the directory holding this file).
# Unknown keys will cause an error.

# Public URL of the deployed site (optional).
site = "https://example.com"

# Base path the site is served from.
base = "/"

# ---------------------------------------------------------------------------
# Work: one markdown file per project, with YAML frontmatter.
# Required frontmatter: title, description, publishDate, tags, img.
# Optional: img_alt, cardSize (normal|tall|wide), aspectRatio, objectPosition,
# order, slug.
# ---------------------------------------------------------------------------
[collections.work]
kind = "markdown"
base = "src/content/work"
pattern = "**/*.md"

# ---------------------------------------------------------------------------
# Galleries: one folder per entry under base_dir, each holding images and
# videos (jpg, jpeg, png, webp, mp4, webm, mov). index.<ext> is the card
# image. Titles and layout hints come from the JSON file at json_path,
# nested under json_key when set.
#
# Asset URLs are /assets/<part of base_dir after /assets/>/<folder>/<file>,
# prefixed by base_path when set.
# ---------------------------------------------------------------------------
[collections.celebrities]
kind = "gallery"
base_dir = "public/assets/celebrities"
json_path = "src/content/celebrities/celebrities.json"
json_key = "highlighted"
has_subfolders = true

[collections.editorials]
kind = "gallery"
base_dir = "public/assets/editorials"
json_path = "src/content/editorials/editorials.json"
json_key = "highlighted"
has_subfolders = true

[collections.publicity]
kind = "gallery"
base_dir = "public/assets/publicity"
json_path = "src/content/publicity/publicity.json"
json_key = "highlighted"
has_subfolders = true

[collections.runway]
kind = "gallery"
base_dir = "public/assets/runway"
json_path = "src/content/runway/runway.json"
json_key = "highlighted"
has_subfolders = true
# base_path = "/portfolio"
"##
}
