//! End-to-end load of a small portfolio tree through the public API:
//! `site.toml` → collections → `content.json` shape.

use folio_collections::collections::{self, Entries};
use folio_collections::config;
use folio_collections::gallery::{GalleryConfig, create_gallery_loader};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SITE_TOML: &str = r#"
site = "https://example.com"
base = "/"

[collections.work]
kind = "markdown"
base = "src/content/work"

[collections.celebrities]
kind = "gallery"
base_dir = "public/assets/celebrities"
json_path = "src/content/celebrities/celebrities.json"
json_key = "highlighted"

[collections.runway]
kind = "gallery"
base_dir = "public/assets/runway"
json_path = "src/content/runway/runway.json"
json_key = "highlighted"
"#;

const CELEBRITIES_JSON: &str = r#"{
  "highlighted": [
    {"id": "maria", "title": "Maria Shoot", "cardSize": "wide", "order": 2},
    {"id": "lucia", "description": "Backstage reel"}
  ]
}"#;

const SPRING_MD: &str = "---
title: Spring Campaign
description: Editorial for spring
publishDate: 2024-03-01
tags: [editorial, color]
img: /assets/work/spring.jpg
cardSize: tall
---
# Spring

Shot on location.
";

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn portfolio() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "site.toml", SITE_TOML.as_bytes());
    write(root, "src/content/celebrities/celebrities.json", CELEBRITIES_JSON.as_bytes());
    write(root, "src/content/runway/runway.json", br#"{"highlighted": []}"#);
    for file in ["index.jpg", "01.jpg", "02.jpg", "backstage.mp4", "notes.txt"] {
        write(root, &format!("public/assets/celebrities/maria/{file}"), b"x");
    }
    write(root, "public/assets/celebrities/lucia/clip.mp4", b"x");
    write(root, "public/assets/celebrities/empty/readme.md", b"x");
    write(root, "src/content/work/spring.md", SPRING_MD.as_bytes());
    tmp
}

#[test]
fn loads_whole_portfolio() {
    let tmp = portfolio();
    let site = config::load_config(tmp.path()).unwrap();
    let store = collections::load_collections(tmp.path(), &site).unwrap();

    assert_eq!(store.site.as_deref(), Some("https://example.com"));
    assert_eq!(store.collections.len(), 3);
    // runway has metadata but no asset folder yet
    assert_eq!(store.get("runway").map(Entries::len), Some(0));

    let Some(Entries::Gallery(celebrities)) = store.get("celebrities") else {
        panic!("celebrities should be a gallery");
    };
    let ids: Vec<&str> = celebrities.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["lucia", "maria"]);

    let maria = &celebrities[1];
    assert_eq!(maria.title, "Maria Shoot");
    assert_eq!(maria.img, "/assets/celebrities/maria/index.jpg");
    assert_eq!(maria.img_alt, "Maria Shoot");
    assert_eq!(
        maria.images,
        vec![
            "/assets/celebrities/maria/01.jpg",
            "/assets/celebrities/maria/02.jpg",
            "/assets/celebrities/maria/backstage.mp4",
        ]
    );
    assert_eq!(maria.video.as_deref(), Some("/assets/celebrities/maria/backstage.mp4"));
    assert!(maria.has_gallery);
    assert_eq!(maria.card_size, "wide");
    assert_eq!(maria.order, 2.0);

    let lucia = &celebrities[0];
    assert_eq!(lucia.title, "lucia");
    assert_eq!(lucia.description, "Backstage reel");
    assert_eq!(lucia.img, "");
    assert_eq!(lucia.video.as_deref(), Some("/assets/celebrities/lucia/clip.mp4"));
    assert!(lucia.images.is_empty());
    assert!(!lucia.has_gallery);

    let Some(Entries::Work(work)) = store.get("work") else {
        panic!("work should be markdown");
    };
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].id, "spring");
    assert_eq!(work[0].card_size.as_str(), "tall");
    assert_eq!(work[0].aspect_ratio, "3 / 4");
    assert!(work[0].html.contains("<h1>Spring</h1>"));
}

#[test]
fn content_json_uses_renderer_field_names() {
    let tmp = portfolio();
    let site = config::load_config(tmp.path()).unwrap();
    let store = collections::load_collections(tmp.path(), &site).unwrap();

    let json: serde_json::Value = serde_json::to_value(&store).unwrap();
    let maria = &json["collections"]["celebrities"][1];
    assert_eq!(maria["id"], "maria");
    assert_eq!(maria["hasGallery"], true);
    assert_eq!(maria["cardSize"], "wide");
    assert_eq!(maria["aspectRatio"], "3 / 4");
    assert_eq!(maria["img_alt"], "Maria Shoot");
    assert!(maria.get("objectPosition").is_none());

    let spring = &json["collections"]["work"][0];
    assert_eq!(spring["publishDate"], "2024-03-01T00:00:00Z");
    assert_eq!(spring["tags"], serde_json::json!(["editorial", "color"]));
}

#[test]
fn repeated_loads_are_identical() {
    let tmp = portfolio();
    let site = config::load_config(tmp.path()).unwrap();
    let first = collections::load_collections(tmp.path(), &site).unwrap();
    let second = collections::load_collections(tmp.path(), &site).unwrap();
    assert_eq!(first, second);
}

#[test]
fn factory_loader_reads_fresh_each_call() {
    let tmp = portfolio();
    let root = tmp.path();
    let load = create_gallery_loader(
        GalleryConfig::new(
            root.join("public/assets/celebrities"),
            root.join("src/content/celebrities/celebrities.json"),
        )
        .with_json_key("highlighted"),
    );

    assert_eq!(load().unwrap().len(), 2);
    write(root, "public/assets/celebrities/ana/index.png", b"x");
    let entries = load().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].img, "/assets/celebrities/ana/index.png");
}

#[test]
fn malformed_metadata_fails_the_build() {
    let tmp = portfolio();
    write(tmp.path(), "src/content/celebrities/celebrities.json", b"{ not json");
    let site = config::load_config(tmp.path()).unwrap();
    let err = collections::load_collections(tmp.path(), &site).unwrap_err();
    assert!(err.to_string().starts_with("collection 'celebrities'"));
}

#[test]
fn stock_config_parses() {
    let site = config::parse_config(config::stock_config_toml()).unwrap();
    let names: Vec<&str> = site.collections.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["celebrities", "editorials", "publicity", "runway", "work"]);
}
