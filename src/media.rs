//! Media file classification.
//!
//! A gallery folder holds images and videos side by side. Only files with one
//! of the known extensions take part in a gallery; everything else (sidecar
//! notes, `.DS_Store`, exported PSDs) is ignored.
//!
//! ## The `index.` rule
//!
//! A file whose name starts with the literal prefix `index.` is the folder's
//! primary preview. It is never listed among the secondary assets:
//!
//! ```text
//! maria/
//! ├── index.jpg     → primary (card image)
//! ├── 01.jpg        → secondary
//! ├── 02.jpg        → secondary
//! └── backstage.mp4 → secondary, and the card's preview video
//! ```

use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];
const INDEX_PREFIX: &str = "index.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// Classify a filename by extension (case-insensitive).
///
/// Returns `None` for anything that is not a gallery asset.
pub fn classify(filename: &str) -> Option<MediaKind> {
    let ext = Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())?;
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

pub fn is_media(filename: &str) -> bool {
    classify(filename).is_some()
}

pub fn is_video(filename: &str) -> bool {
    classify(filename) == Some(MediaKind::Video)
}

/// Whether the file is the designated primary of its folder.
///
/// The prefix match is literal and case-sensitive: `Index.jpg` is an ordinary
/// secondary asset.
pub fn is_index(filename: &str) -> bool {
    filename.starts_with(INDEX_PREFIX)
}

/// A gallery folder's media files, split into primary and secondary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderMedia {
    /// First `index.*` media file, if any.
    pub index: Option<String>,
    /// Non-index media files, sorted by filename.
    pub secondary: Vec<String>,
    /// First video file in filename order, index or not.
    pub video: Option<String>,
}

impl FolderMedia {
    /// Split a folder listing. Non-media names are dropped.
    pub fn from_filenames<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n| is_media(n))
            .collect();
        names.sort();

        let index = names.iter().find(|n| is_index(n)).cloned();
        let video = names.iter().find(|n| is_video(n)).cloned();
        let mut secondary: Vec<String> = names.into_iter().filter(|n| !is_index(n)).collect();

        // A lone video is the folder's preview, not a one-item gallery.
        if index.is_none() && secondary.len() == 1 && video.as_ref() == secondary.first() {
            secondary.clear();
        }

        Self {
            index,
            secondary,
            video,
        }
    }

    /// Primary image: the index file, else the first secondary asset.
    pub fn primary(&self) -> Option<&str> {
        self.index
            .as_deref()
            .or_else(|| self.secondary.first().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_none() && self.secondary.is_empty() && self.video.is_none()
    }
}
