//! Markdown collection loader.
//!
//! Project pages ("work") are markdown files with a YAML frontmatter block:
//!
//! ```text
//! ---
//! title: Spring Campaign
//! description: Lookbook for a Madrid label
//! publishDate: 2024-03-01
//! tags: [campaign, fashion]
//! img: /assets/work/spring/cover.jpg
//! cardSize: wide
//! ---
//! The shoot took place over two days...
//! ```
//!
//! Files are discovered under the collection's `base` directory and filtered by
//! a glob `pattern` matched against the path relative to `base`
//! (`**/*.md` by default). The entry id is that relative path without its
//! extension, slugified per segment (`Spring Campaign/index.md` becomes
//! `spring-campaign/index`), unless the frontmatter sets `slug`.
//!
//! Frontmatter is checked against the work schema while deserializing: the
//! required fields must be present and `cardSize` must be a known size.

use crate::schema::{CardSize, DEFAULT_ASPECT_RATIO, DEFAULT_ORDER};
use chrono::{DateTime, NaiveDate, Utc};
use glob::{MatchOptions, Pattern};
use pulldown_cmark::{Parser, html as md_html};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const DEFAULT_PATTERN: &str = "**/*.md";

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("{0}: missing frontmatter block")]
    NoFrontmatter(PathBuf),
    #[error("{path}: invalid frontmatter: {source}")]
    Frontmatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("{path}: publishDate '{value}' is not a date")]
    Date { path: PathBuf, value: String },
}

/// Where a markdown collection lives.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownConfig {
    pub base: PathBuf,
    pub pattern: String,
}

impl MarkdownConfig {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }
}

/// Frontmatter as written by hand. Required fields have no default.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Frontmatter {
    slug: Option<String>,
    title: String,
    description: String,
    publish_date: String,
    tags: Vec<String>,
    img: String,
    #[serde(rename = "img_alt")]
    img_alt: Option<String>,
    #[serde(default)]
    card_size: CardSize,
    #[serde(default = "default_aspect_ratio")]
    aspect_ratio: String,
    object_position: Option<String>,
    #[serde(default = "default_order")]
    order: f64,
}

fn default_aspect_ratio() -> String {
    DEFAULT_ASPECT_RATIO.to_string()
}

fn default_order() -> f64 {
    DEFAULT_ORDER
}

/// A project page from the work collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub publish_date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub img: String,
    #[serde(rename = "img_alt", default, skip_serializing_if = "Option::is_none")]
    pub img_alt: Option<String>,
    pub card_size: CardSize,
    pub aspect_ratio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_position: Option<String>,
    pub order: f64,
    /// Raw markdown after the frontmatter.
    pub body: String,
    /// `body` rendered to HTML.
    pub html: String,
}

#[derive(Debug, Clone)]
pub struct MarkdownLoader {
    config: MarkdownConfig,
    root: Option<PathBuf>,
}

impl MarkdownLoader {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config, root: None }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Read every matching file, sorted by id.
    pub fn load(&self) -> Result<Vec<WorkEntry>, MarkdownError> {
        let pattern = Pattern::new(&self.config.pattern).map_err(|e| MarkdownError::Pattern {
            pattern: self.config.pattern.clone(),
            source: e,
        })?;

        let base = match &self.root {
            Some(root) => root.join(&self.config.base),
            None => self.config.base.clone(),
        };
        if !base.exists() {
            warn!(path = %base.display(), "markdown directory does not exist");
            return Ok(Vec::new());
        }

        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };

        let mut entries = Vec::new();
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| MarkdownError::Walk {
                path: base.clone(),
                source: e,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&base) else {
                continue;
            };
            if !pattern.matches_path_with(rel, options) {
                continue;
            }
            entries.push(load_entry(entry.path(), rel)?);
        }

        entries.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(path = %base.display(), entries = entries.len(), "loaded markdown");
        Ok(entries)
    }
}

/// Parse one markdown file. `rel` is its path relative to the collection base.
pub fn load_entry(path: &Path, rel: &Path) -> Result<WorkEntry, MarkdownError> {
    let content = fs::read_to_string(path).map_err(|e| MarkdownError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (yaml, body) = split_frontmatter(&content)
        .ok_or_else(|| MarkdownError::NoFrontmatter(path.to_path_buf()))?;

    let fm: Frontmatter = serde_yaml::from_str(yaml).map_err(|e| MarkdownError::Frontmatter {
        path: path.to_path_buf(),
        source: e,
    })?;
    let publish_date = coerce_date(&fm.publish_date).ok_or_else(|| MarkdownError::Date {
        path: path.to_path_buf(),
        value: fm.publish_date.clone(),
    })?;

    Ok(WorkEntry {
        id: fm.slug.unwrap_or_else(|| entry_id(rel)),
        title: fm.title,
        description: fm.description,
        publish_date,
        tags: fm.tags,
        img: fm.img,
        img_alt: fm.img_alt,
        card_size: fm.card_size,
        aspect_ratio: fm.aspect_ratio,
        object_position: fm.object_position,
        order: fm.order,
        html: render_html(body),
        body: body.to_string(),
    })
}

/// Split `---`-delimited frontmatter from the body.
///
/// The opening fence must be the first line; the closing fence is the next
/// line consisting of `---`.
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let (yaml, after) = if let Some(after) = rest.strip_prefix("---") {
        ("", after)
    } else {
        let end = rest.find("\n---")?;
        (&rest[..end], &rest[end + 4..])
    };
    let body = after.split_once('\n').map(|(_, b)| b).unwrap_or("");
    Some((yaml, body))
}

/// Accept an RFC 3339 timestamp or a bare `YYYY-MM-DD` (midnight UTC).
fn coerce_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })
}

/// Relative path without extension, each segment slugified.
fn entry_id(rel: &Path) -> String {
    let stem = rel.with_extension("");
    stem.components()
        .map(|c| slugify(&c.as_os_str().to_string_lossy()))
        .collect::<Vec<_>>()
        .join("/")
}

fn slugify(segment: &str) -> String {
    segment
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

fn render_html(body: &str) -> String {
    let parser = Parser::new(body);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}
