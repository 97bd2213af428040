//! CLI output formatting.
//!
//! Output is **information-centric, not file-centric**: each entry leads with
//! its position and title, with URLs shown as indented context lines.
//!
//! ```text
//! 001 celebrities (gallery, 2 entries)
//!     001 Maria Shoot (3 images)
//!         Card: /assets/celebrities/maria/index.jpg
//!         Video: /assets/celebrities/maria/backstage.mp4
//!     002 lucia
//!         Video: /assets/celebrities/lucia/clip.mp4
//! 002 work (markdown, 1 entry)
//!     001 Spring Campaign
//!         Published: 2024-03-01
//!
//! Loaded 2 collections, 3 entries
//! ```
//!
//! Entries are listed in display order: ascending `order`, ties kept in load
//! order. Each `format_*` function returns lines and does no I/O; the `print_*`
//! wrappers write them to stdout.

use crate::collections::{ContentStore, Entries};
use crate::gallery::GalleryEntry;
use crate::markdown::WorkEntry;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Header line for a collection: index, name, kind and entry count.
///
/// ```text
/// 001 celebrities (gallery, 5 entries)
/// ```
fn collection_header(index: usize, name: &str, entries: &Entries) -> String {
    format!(
        "{} {} ({}, {})",
        format_index(index),
        name,
        entries.kind(),
        count(entries.len(), "entry", "entries")
    )
}

/// Indices of `orders` sorted ascending, stable for equal values.
fn display_order(orders: impl Iterator<Item = f64>) -> Vec<usize> {
    let mut idx: Vec<(usize, f64)> = orders.enumerate().collect();
    idx.sort_by(|a, b| a.1.total_cmp(&b.1));
    idx.into_iter().map(|(i, _)| i).collect()
}

fn gallery_lines(entries: &[GalleryEntry], indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (pos, i) in display_order(entries.iter().map(|e| e.order)).into_iter().enumerate() {
        let entry = &entries[i];
        let header = if entry.images.is_empty() {
            format!("{} {}", format_index(pos + 1), entry.title)
        } else {
            format!(
                "{} {} ({})",
                format_index(pos + 1),
                entry.title,
                count(entry.images.len(), "image", "images")
            )
        };
        lines.push(format!("{indent}{header}"));
        if !entry.img.is_empty() {
            lines.push(format!("{indent}    Card: {}", entry.img));
        }
        if let Some(video) = &entry.video {
            lines.push(format!("{indent}    Video: {video}"));
        }
    }
    lines
}

fn work_lines(entries: &[WorkEntry], indent: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (pos, i) in display_order(entries.iter().map(|e| e.order)).into_iter().enumerate() {
        let entry = &entries[i];
        lines.push(format!("{indent}{} {}", format_index(pos + 1), entry.title));
        lines.push(format!(
            "{indent}    Published: {}",
            entry.publish_date.format("%Y-%m-%d")
        ));
        if !entry.tags.is_empty() {
            lines.push(format!("{indent}    Tags: {}", entry.tags.join(", ")));
        }
    }
    lines
}

fn entry_lines(entries: &Entries, indent: &str) -> Vec<String> {
    match entries {
        Entries::Gallery(e) => gallery_lines(e, indent),
        Entries::Work(e) => work_lines(e, indent),
    }
}

/// Format every collection in the store with a closing summary line.
pub fn format_store_output(store: &ContentStore) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (name, entries)) in store.collections.iter().enumerate() {
        lines.push(collection_header(i + 1, name, entries));
        lines.extend(entry_lines(entries, "    "));
    }
    lines.push(String::new());
    lines.push(format!(
        "Loaded {}, {}",
        count(store.collections.len(), "collection", "collections"),
        count(store.total_entries(), "entry", "entries")
    ));
    lines
}

/// Format one collection, as shown by `folio list`.
pub fn format_collection_output(name: &str, entries: &Entries) -> Vec<String> {
    let mut lines = vec![collection_header(1, name, entries)];
    lines.extend(entry_lines(entries, "    "));
    lines
}

pub fn print_store_output(store: &ContentStore) {
    for line in format_store_output(store) {
        println!("{}", line);
    }
}

pub fn print_collection_output(name: &str, entries: &Entries) {
    for line in format_collection_output(name, entries) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::gallery_entry;
    use std::collections::BTreeMap;

    fn store_with(entries: Vec<GalleryEntry>) -> ContentStore {
        let mut collections = BTreeMap::new();
        collections.insert("celebrities".to_string(), Entries::Gallery(entries));
        ContentStore {
            site: None,
            base: "/".to_string(),
            collections,
        }
    }

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn display_order_is_stable() {
        assert_eq!(display_order([2.0, 0.0, 1.0, 0.0].into_iter()), vec![1, 3, 2, 0]);
    }

    #[test]
    fn store_output_lists_collections_and_summary() {
        let store = store_with(vec![gallery_entry("maria")]);
        let lines = format_store_output(&store);
        assert_eq!(lines[0], "001 celebrities (gallery, 1 entry)");
        assert_eq!(lines[1], "    001 maria (1 image)");
        assert_eq!(lines[2], "        Card: /assets/test/maria/index.jpg");
        assert_eq!(lines.last().unwrap(), "Loaded 1 collection, 1 entry");
    }

    #[test]
    fn entries_sorted_by_order() {
        let mut first = gallery_entry("zoe");
        first.order = -1.0;
        let store = store_with(vec![gallery_entry("ana"), first]);
        let lines = format_store_output(&store);
        assert!(lines[1].ends_with("zoe (1 image)"));
        assert!(lines.iter().any(|l| l.starts_with("    002 ana")));
    }

    #[test]
    fn video_only_entry_shows_video_line() {
        let mut entry = gallery_entry("lucia");
        entry.img.clear();
        entry.images.clear();
        entry.video = Some("/assets/test/lucia/clip.mp4".to_string());
        let lines = format_collection_output("celebrities", &Entries::Gallery(vec![entry]));
        assert_eq!(lines[1], "    001 lucia");
        assert_eq!(lines[2], "        Video: /assets/test/lucia/clip.mp4");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_store_summary() {
        let store = ContentStore {
            site: None,
            base: "/".to_string(),
            collections: BTreeMap::new(),
        };
        assert_eq!(
            format_store_output(&store),
            vec![String::new(), "Loaded 0 collections, 0 entries".to_string()]
        );
    }
}
