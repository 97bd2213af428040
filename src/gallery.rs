//! Gallery loader: folders of images and videos become portfolio entries.
//!
//! ## Directory Structure
//!
//! ```text
//! public/assets/celebrities/           # base_dir
//! ├── maria/                           # one entry, id = "maria"
//! │   ├── index.jpg                    # primary image (card)
//! │   ├── 01.jpg                       # secondary assets, sorted by name
//! │   ├── 02.jpg
//! │   └── backstage.mp4                # also the card's preview video
//! ├── lucia/
//! │   └── clip.mp4                     # video-only card, no gallery
//! └── drafts/
//!     └── notes.txt                    # no media → dropped
//!
//! src/content/celebrities/celebrities.json   # json_path
//! ```
//!
//! ## Output
//!
//! One [`GalleryEntry`] per folder, with filesystem facts (which files exist)
//! merged with hand-authored metadata (titles, layout hints). Asset paths are
//! public URLs rooted at `/assets/<collection>/<slug>/<filename>`, the layout
//! the renderer expects:
//!
//! ```text
//! maria/01.jpg  →  /assets/celebrities/maria/01.jpg
//! ```
//!
//! ## Failure Modes
//!
//! A missing `base_dir` is logged and yields no entries, so a site can build
//! before a collection has any content. Everything else is fatal: a missing
//! or malformed metadata file, or a folder that cannot be listed, aborts the
//! whole collection.

use crate::media::{self, FolderMedia, MediaKind};
use crate::metadata::{self, MetadataError, MetadataIndex, MetadataRecord, resolve};
use crate::schema::{CardSize, DEFAULT_ASPECT_RATIO, DEFAULT_ORDER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const ASSETS_SEGMENT: &str = "/assets/";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where a gallery collection lives and how to read it.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    /// Directory holding one subfolder per entry. Also the source of the URL
    /// segment: the part after `/assets/`.
    pub base_dir: PathBuf,
    /// Companion metadata JSON.
    pub json_path: PathBuf,
    /// Optional top-level key the records are nested under.
    pub json_key: Option<String>,
    /// Entries are subfolders (`true`) or individual files (`false`).
    pub has_subfolders: bool,
    /// Prefix for every generated URL, e.g. `/portfolio`.
    pub base_path: Option<String>,
}

impl GalleryConfig {
    pub fn new(base_dir: impl Into<PathBuf>, json_path: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            json_path: json_path.into(),
            json_key: None,
            has_subfolders: true,
            base_path: None,
        }
    }

    pub fn with_json_key(mut self, key: impl Into<String>) -> Self {
        self.json_key = Some(key.into());
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn with_subfolders(mut self, has_subfolders: bool) -> Self {
        self.has_subfolders = has_subfolders;
        self
    }

    /// URL segment for this collection: whatever follows `/assets/` in
    /// `base_dir`, or the directory name when there is no such segment.
    pub fn url_segment(&self) -> String {
        let dir = self.base_dir.to_string_lossy().replace('\\', "/");
        let dir = dir.trim_end_matches('/');
        match dir.split(ASSETS_SEGMENT).nth(1) {
            Some(segment) => segment.to_string(),
            None => self
                .base_dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }
}

/// A gallery item as consumed by the renderer.
///
/// Field names serialize exactly as the templates read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    /// Folder name (the slug).
    pub id: String,
    pub title: String,
    pub description: String,
    /// Primary image URL; empty when the entry only has a video.
    pub img: String,
    #[serde(rename = "img_alt")]
    pub img_alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    pub card_size: String,
    pub aspect_ratio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_position: Option<String>,
    /// Secondary asset URLs, sorted by filename, index file excluded.
    pub images: Vec<String>,
    pub has_gallery: bool,
    pub order: f64,
}

/// Reads a gallery collection from disk on every [`load`](Self::load).
#[derive(Debug, Clone)]
pub struct GalleryLoader {
    config: GalleryConfig,
    root: Option<PathBuf>,
}

impl GalleryLoader {
    pub fn new(config: GalleryConfig) -> Self {
        Self { config, root: None }
    }

    /// Resolve `base_dir` and `json_path` against `root` when reading.
    ///
    /// URLs are still derived from `base_dir` as configured, so a project
    /// checked out under some `/assets/` path does not leak into them.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    fn fs_path(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Build the full entry list from the current state of the filesystem.
    pub fn load(&self) -> Result<Vec<GalleryEntry>, LoaderError> {
        let index = metadata::load_metadata(
            &self.fs_path(&self.config.json_path),
            self.config.json_key.as_deref(),
        )?;

        let base = self.fs_path(&self.config.base_dir);
        if !base.exists() {
            warn!(path = %base.display(), "gallery directory does not exist");
            return Ok(Vec::new());
        }

        let urls = UrlBuilder::new(&self.config);
        let entries = if self.config.has_subfolders {
            self.load_subfolders(&base, &index, &urls)?
        } else {
            self.load_flat(&base, &index, &urls)?
        };

        debug!(
            path = %base.display(),
            entries = entries.len(),
            records = index.len(),
            "loaded gallery"
        );
        Ok(entries)
    }

    fn load_subfolders(
        &self,
        base: &Path,
        index: &MetadataIndex,
        urls: &UrlBuilder,
    ) -> Result<Vec<GalleryEntry>, LoaderError> {
        let mut entries = Vec::new();
        for dir in list_dir(base)?.into_iter().filter(|p| p.is_dir()) {
            let slug = file_name(&dir);
            let names = list_dir(&dir)?
                .into_iter()
                .filter(|p| p.is_file())
                .map(|p| file_name(&p));
            let media = FolderMedia::from_filenames(names);
            if media.is_empty() {
                debug!(slug = %slug, "skipping folder without media");
                continue;
            }

            let url = |f: &str| urls.asset(Some(&slug), f);
            let images: Vec<String> = media.secondary.iter().map(|f| url(f.as_str())).collect();
            let assets = Assets {
                img: media.primary().map(url),
                video: media.video.as_deref().map(url),
                has_gallery: images.len() > 1,
                images,
            };
            entries.extend(build_entry(&slug, assets, index.lookup(&slug)));
        }
        Ok(entries)
    }

    /// Flat mode: every media file directly in `base` is an entry, keyed by
    /// stem. An image and a video sharing a stem form one entry.
    fn load_flat(
        &self,
        base: &Path,
        index: &MetadataIndex,
        urls: &UrlBuilder,
    ) -> Result<Vec<GalleryEntry>, LoaderError> {
        let mut by_stem: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for path in list_dir(base)?.into_iter().filter(|p| p.is_file()) {
            let name = file_name(&path);
            if !media::is_media(&name) || media::is_index(&name) {
                continue;
            }
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            by_stem.entry(stem).or_default().push(name);
        }

        let mut entries = Vec::new();
        for (stem, names) in by_stem {
            let first_of = |kind| {
                names
                    .iter()
                    .find(|n| media::classify(n) == Some(kind))
                    .map(|n| urls.asset(None, n))
            };
            let assets = Assets {
                img: first_of(MediaKind::Image),
                video: first_of(MediaKind::Video),
                images: Vec::new(),
                has_gallery: false,
            };
            entries.extend(build_entry(&stem, assets, index.lookup(&stem)));
        }
        Ok(entries)
    }
}

/// Return a producer closure over `config`.
///
/// The closure re-reads the directory and metadata on every call; nothing is
/// cached between invocations.
pub fn create_gallery_loader(
    config: GalleryConfig,
) -> impl Fn() -> Result<Vec<GalleryEntry>, LoaderError> {
    let loader = GalleryLoader::new(config);
    move || loader.load()
}

/// Resolved asset URLs for one entry.
struct Assets {
    img: Option<String>,
    video: Option<String>,
    images: Vec<String>,
    has_gallery: bool,
}

/// Merge filesystem facts with the entry's metadata record.
///
/// Returns `None` when there is neither an image nor a video to show.
fn build_entry(
    slug: &str,
    assets: Assets,
    record: Option<&MetadataRecord>,
) -> Option<GalleryEntry> {
    if assets.img.is_none() && assets.video.is_none() {
        return None;
    }

    let record = record.cloned().unwrap_or_default();
    let title = record.title.as_deref();

    Some(GalleryEntry {
        id: slug.to_string(),
        title: resolve(&[title, Some(slug)]).unwrap_or_default(),
        description: resolve(&[record.description.as_deref()]).unwrap_or_default(),
        img: assets.img.unwrap_or_default(),
        img_alt: resolve(&[record.img_alt.as_deref(), title, Some(slug)]).unwrap_or_default(),
        video: assets.video,
        card_size: resolve(&[record.card_size.as_deref()])
            .unwrap_or_else(|| CardSize::default().to_string()),
        aspect_ratio: resolve(&[record.aspect_ratio.as_deref()])
            .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
        object_position: resolve(&[record.object_position.as_deref()]),
        images: assets.images,
        has_gallery: assets.has_gallery,
        order: record.order.unwrap_or(DEFAULT_ORDER),
    })
}

/// Builds `[base_path]/assets/<segment>/[<slug>/]<filename>`.
struct UrlBuilder {
    prefix: String,
}

impl UrlBuilder {
    fn new(config: &GalleryConfig) -> Self {
        let base_path = config.base_path.as_deref().unwrap_or_default();
        Self {
            prefix: format!("{}/assets/{}", base_path, config.url_segment()),
        }
    }

    fn asset(&self, slug: Option<&str>, filename: &str) -> String {
        match slug {
            Some(slug) => format!("{}/{}/{}", self.prefix, slug, filename),
            None => format!("{}/{}", self.prefix, filename),
        }
    }
}

fn list_dir(path: &Path) -> Result<Vec<PathBuf>, LoaderError> {
    let list_err = |e: std::io::Error| LoaderError::List {
        path: path.to_path_buf(),
        source: e,
    };
    let mut entries = fs::read_dir(path)
        .map_err(list_err)?
        .map(|e| e.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(list_err)?;
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
