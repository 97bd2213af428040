//! Shared test utilities.
//!
//! Fixture builders write small content trees into a `TempDir`; lookups panic
//! with the available ids on a miss so failing assertions say what was there.
//!
//! ```rust
//! let tmp = TempDir::new().unwrap();
//! write_metadata(&tmp, "celebrities.json", r#"[{"id": "maria"}]"#);
//! write_media(&tmp, "public/assets/celebrities/maria", &["index.jpg", "a.jpg"]);
//!
//! let entries = loader.load().unwrap();
//! assert_eq!(find_entry(&entries, "maria").images.len(), 1);
//! ```

use std::fs;
use tempfile::TempDir;

use crate::gallery::GalleryEntry;
use crate::markdown::WorkEntry;

// =========================================================================
// Fixture builders
// =========================================================================

/// Create `dir` (relative to the temp root) holding empty files named `files`.
///
/// The loader only looks at names, so file contents don't matter.
pub fn write_media(tmp: &TempDir, dir: &str, files: &[&str]) {
    let dir = tmp.path().join(dir);
    fs::create_dir_all(&dir).unwrap();
    for name in files {
        fs::write(dir.join(name), "fake media").unwrap();
    }
}

/// Write a metadata JSON file at `rel`, creating parent directories.
pub fn write_metadata(tmp: &TempDir, rel: &str, json: &str) {
    write_file(tmp, rel, json);
}

/// Write a markdown file with the given frontmatter block and body.
pub fn write_markdown(tmp: &TempDir, rel: &str, frontmatter: &str, body: &str) {
    write_file(tmp, rel, &format!("---\n{}\n---\n{}", frontmatter.trim(), body));
}

pub fn write_file(tmp: &TempDir, rel: &str, content: &str) {
    let path = tmp.path().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Minimal valid work frontmatter with the given title.
pub fn work_frontmatter(title: &str) -> String {
    format!(
        "title: {title}\ndescription: A project\npublishDate: 2024-03-01\ntags: [editorial]\nimg: /assets/work/{title}.jpg"
    )
}

// =========================================================================
// Entry builders
// =========================================================================

/// A gallery entry with default layout fields, as the loader would build it
/// for a folder holding `index.jpg` and `a.jpg`.
pub fn gallery_entry(slug: &str) -> GalleryEntry {
    GalleryEntry {
        id: slug.to_string(),
        title: slug.to_string(),
        description: String::new(),
        img: format!("/assets/test/{slug}/index.jpg"),
        img_alt: slug.to_string(),
        video: None,
        card_size: "normal".to_string(),
        aspect_ratio: "3 / 4".to_string(),
        object_position: None,
        images: vec![format!("/assets/test/{slug}/a.jpg")],
        has_gallery: false,
        order: 0.0,
    }
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a gallery entry by id. Panics if not found.
pub fn find_entry<'a>(entries: &'a [GalleryEntry], id: &str) -> &'a GalleryEntry {
    entries.iter().find(|e| e.id == id).unwrap_or_else(|| {
        panic!(
            "entry '{id}' not found. Available: {:?}",
            entry_ids(entries)
        )
    })
}

/// Find a work entry by id. Panics if not found.
pub fn find_work<'a>(entries: &'a [WorkEntry], id: &str) -> &'a WorkEntry {
    entries.iter().find(|e| e.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        panic!("work entry '{id}' not found. Available: {ids:?}")
    })
}

/// All gallery entry ids in result order.
pub fn entry_ids(entries: &[GalleryEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}
