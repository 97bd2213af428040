//! Hand-authored gallery metadata.
//!
//! Each gallery collection has a companion JSON file with titles, captions and
//! layout hints. Two shapes are in use:
//!
//! ```text
//! { "highlighted": [ { "id": "maria", "title": "Maria Shoot", "order": 2 } ] }
//! { "maria": [ { "title": "Maria Shoot" } ] }
//! ```
//!
//! The first is a list of records matched by `id` (or by a substring of
//! `img`), optionally nested under a key. The second maps a folder slug to an
//! array whose first element is the record. Both are resolved once at parse
//! time into a [`MetadataIndex`] so the loader only ever calls
//! [`MetadataIndex::lookup`].
//!
//! ## Field resolution
//!
//! Every field is optional. The loader resolves each one independently with
//! [`resolve`]: the first present, non-empty value wins, otherwise a default.
//! A field holding the wrong JSON type (a numeric `id`, a string `order`)
//! counts as absent, so one sloppy record never fails the collection.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to read metadata {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("metadata in {0} must be an array of records or an object keyed by slug")]
    Shape(PathBuf),
}

/// One hand-authored metadata record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub img: Option<String>,
    #[serde(rename = "img_alt", deserialize_with = "lenient_string")]
    pub img_alt: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub card_size: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub aspect_ratio: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub object_position: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub order: Option<f64>,
}

impl MetadataRecord {
    /// Whether this record describes the folder `slug`.
    fn matches(&self, slug: &str) -> bool {
        self.id.as_deref() == Some(slug)
            || self.img.as_deref().is_some_and(|img| img.contains(slug))
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// Parsed metadata, in whichever shape the file used.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataIndex {
    /// A list of records, matched by `id` or `img`.
    Records(Vec<MetadataRecord>),
    /// Slug → record (first element of the slug's array).
    BySlug(BTreeMap<String, MetadataRecord>),
}

impl Default for MetadataIndex {
    fn default() -> Self {
        MetadataIndex::Records(Vec::new())
    }
}

impl MetadataIndex {
    /// Find the record for a folder slug.
    ///
    /// In list form the first matching record wins, so an earlier record whose
    /// `img` merely contains the slug shadows a later exact `id` match.
    pub fn lookup(&self, slug: &str) -> Option<&MetadataRecord> {
        match self {
            MetadataIndex::Records(records) => records.iter().find(|r| r.matches(slug)),
            MetadataIndex::BySlug(map) => map.get(slug),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MetadataIndex::Records(records) => records.len(),
            MetadataIndex::BySlug(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Classify an already-parsed JSON document, descending into `key` first.
    ///
    /// A `key` the document does not have yields an empty index: every folder
    /// then falls back to its defaults. `source` is only used in messages.
    pub fn from_value(
        value: Value,
        key: Option<&str>,
        source: &Path,
    ) -> Result<Self, MetadataError> {
        let value = match key {
            Some(key) => {
                let nested = match value {
                    Value::Object(mut map) => map.remove(key),
                    _ => None,
                };
                let Some(nested) = nested else {
                    warn!(key, path = %source.display(), "metadata key not found");
                    return Ok(MetadataIndex::default());
                };
                nested
            }
            None => value,
        };

        let json_err = |e: serde_json::Error| MetadataError::Json {
            path: source.to_path_buf(),
            source: e,
        };

        match value {
            Value::Array(items) => {
                // Non-object items can never match a slug.
                let records = items
                    .into_iter()
                    .filter(Value::is_object)
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<MetadataRecord>, _>>()
                    .map_err(json_err)?;
                Ok(MetadataIndex::Records(records))
            }
            Value::Object(map) => {
                let mut by_slug = BTreeMap::new();
                for (slug, entry) in map {
                    // Only `[record, ...]` counts; anything else has no record.
                    let Some(first) = entry.as_array().and_then(|a| a.first()) else {
                        continue;
                    };
                    if !first.is_object() {
                        continue;
                    }
                    let record: MetadataRecord =
                        serde_json::from_value(first.clone()).map_err(json_err)?;
                    by_slug.insert(slug, record);
                }
                Ok(MetadataIndex::BySlug(by_slug))
            }
            _ => Err(MetadataError::Shape(source.to_path_buf())),
        }
    }
}

/// Read and parse a metadata file.
///
/// A missing or unreadable file is an error: the loader treats metadata as a
/// required input even though individual records are optional.
pub fn load_metadata(path: &Path, key: Option<&str>) -> Result<MetadataIndex, MetadataError> {
    let content = fs::read_to_string(path).map_err(|e| MetadataError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|e| MetadataError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    MetadataIndex::from_value(value, key, path)
}

/// Return the first present, non-empty value from sources in priority order.
///
/// ```text
/// title:   resolve(&[record.title, Some(slug)])
/// img_alt: resolve(&[record.img_alt, record.title, Some(slug)])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}
