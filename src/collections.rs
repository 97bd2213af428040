//! Collection registry and content store.
//!
//! A site declares its collections in `site.toml`; each one is backed by a
//! loader. [`load_collections`] builds the loaders, runs them,
//! checks gallery entries against the schema and gathers everything into a
//! [`ContentStore`], the JSON document the renderer reads.
//!
//! ```text
//! site.toml ──► CollectionConfig ──► GalleryLoader / MarkdownLoader
//!                                          │
//!                                          ▼
//!                          ContentStore { collections: { name: [entries] } }
//! ```
//!
//! Collections are independent, so they load in parallel on the rayon pool.
//! Loading is all-or-nothing: any collection that fails aborts the build.

use crate::config::{
    CollectionConfig, GalleryCollectionConfig, MarkdownCollectionConfig, SiteConfig,
};
use crate::gallery::{GalleryEntry, GalleryLoader, LoaderError};
use crate::markdown::{MarkdownError, MarkdownLoader, WorkEntry};
use crate::schema::{self, SchemaError};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("collection '{name}': {source}")]
    Gallery { name: String, source: LoaderError },
    #[error("collection '{name}': {source}")]
    Markdown { name: String, source: MarkdownError },
    #[error("collection '{name}': {source}")]
    Schema { name: String, source: SchemaError },
    #[error("unknown collection '{0}'")]
    Unknown(String),
}

/// Something that produces the entries of one collection.
///
/// Every call reads from disk again; implementations keep no state between
/// loads.
pub trait CollectionLoader {
    type Entry: Serialize;
    type Error: std::error::Error;

    fn load(&self) -> Result<Vec<Self::Entry>, Self::Error>;
}

impl CollectionLoader for GalleryLoader {
    type Entry = GalleryEntry;
    type Error = LoaderError;

    fn load(&self) -> Result<Vec<GalleryEntry>, LoaderError> {
        GalleryLoader::load(self)
    }
}

impl CollectionLoader for MarkdownLoader {
    type Entry = WorkEntry;
    type Error = MarkdownError;

    fn load(&self) -> Result<Vec<WorkEntry>, MarkdownError> {
        MarkdownLoader::load(self)
    }
}

/// Loaded entries of one collection, serialized as a bare array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entries {
    Gallery(Vec<GalleryEntry>),
    Work(Vec<WorkEntry>),
}

impl Entries {
    pub fn len(&self) -> usize {
        match self {
            Entries::Gallery(e) => e.len(),
            Entries::Work(e) => e.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Entries::Gallery(_) => "gallery",
            Entries::Work(_) => "markdown",
        }
    }
}

/// Everything the renderer needs, serialized as `content.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentStore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub base: String,
    pub collections: BTreeMap<String, Entries>,
}

impl ContentStore {
    pub fn get(&self, name: &str) -> Option<&Entries> {
        self.collections.get(name)
    }

    pub fn total_entries(&self) -> usize {
        self.collections.values().map(Entries::len).sum()
    }
}

/// Build the loader for a configured gallery collection.
pub fn gallery_loader(root: &Path, config: &GalleryCollectionConfig) -> GalleryLoader {
    GalleryLoader::new(config.to_gallery_config()).with_root(root)
}

/// Build the loader for a configured markdown collection.
pub fn markdown_loader(root: &Path, config: &MarkdownCollectionConfig) -> MarkdownLoader {
    MarkdownLoader::new(config.to_markdown_config()).with_root(root)
}

/// Load one collection by its configuration.
pub fn load_collection(
    root: &Path,
    name: &str,
    config: &CollectionConfig,
) -> Result<Entries, CollectionError> {
    let entries = match config {
        CollectionConfig::Gallery(gallery) => {
            let entries = gallery_loader(root, gallery)
                .load()
                .map_err(|e| CollectionError::Gallery {
                    name: name.to_string(),
                    source: e,
                })?;
            schema::check_gallery_entries(&entries).map_err(|e| CollectionError::Schema {
                name: name.to_string(),
                source: e,
            })?;
            Entries::Gallery(entries)
        }
        CollectionConfig::Markdown(markdown) => {
            let entries = markdown_loader(root, markdown)
                .load()
                .map_err(|e| CollectionError::Markdown {
                    name: name.to_string(),
                    source: e,
                })?;
            Entries::Work(entries)
        }
    };
    info!(collection = name, kind = entries.kind(), entries = entries.len(), "loaded collection");
    Ok(entries)
}

/// Load one named collection from the site config.
pub fn load_named(root: &Path, site: &SiteConfig, name: &str) -> Result<Entries, CollectionError> {
    let config = site
        .collections
        .get(name)
        .ok_or_else(|| CollectionError::Unknown(name.to_string()))?;
    load_collection(root, name, config)
}

/// Load every configured collection, relative to the project `root`.
pub fn load_collections(root: &Path, site: &SiteConfig) -> Result<ContentStore, CollectionError> {
    let collections = site
        .collections
        .par_iter()
        .map(|(name, config)| load_collection(root, name, config).map(|e| (name.clone(), e)))
        .collect::<Result<BTreeMap<_, _>, CollectionError>>()?;
    Ok(ContentStore {
        site: site.site.clone(),
        base: site.base.clone(),
        collections,
    })
}
