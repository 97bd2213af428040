//! # Folio Collections
//!
//! Typed content collections for a photography portfolio. The site's content
//! lives in two places: markdown project pages, and folders of images and
//! videos with a hand-written JSON file of titles and layout hints. This crate
//! turns both into entry lists the renderer can trust.
//!
//! # Pipeline
//!
//! ```text
//! site.toml ─► config ─► collections ─┬─► gallery  (folders + JSON) ─┐
//!                                     └─► markdown (frontmatter)    ─┴─► content.json
//! ```
//!
//! Every load reads the filesystem from scratch. There is no cache and no
//! watch mode; running the loader twice over an unchanged tree gives the same
//! result.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | The gallery loader: one entry per media folder, merged with metadata |
//! | [`media`] | Extension classification and the `index.` primary-file rule |
//! | [`metadata`] | Companion JSON, resolved once into a lookup by slug |
//! | [`markdown`] | Markdown collection loader with YAML frontmatter |
//! | [`schema`] | Card sizes, declared defaults, entry checks |
//! | [`collections`] | Loader trait, registry and the serialized [`collections::ContentStore`] |
//! | [`config`] | `site.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Filesystem Is the Gallery
//!
//! Adding a shoot means dropping a folder into `public/assets/<collection>/`.
//! Metadata is optional per entry: a folder with no record still appears,
//! titled by its folder name, with default layout. The JSON file only refines.
//!
//! ## Tolerate Absence, Reject Malformation
//!
//! A collection whose directory does not exist yet loads as empty with a
//! warning, so a new section can be configured before it has content. A
//! missing or broken metadata file, or an unreadable folder, fails the build:
//! silently dropping hand-written data is worse than stopping.
//!
//! ## Stable URLs
//!
//! Asset URLs follow `/assets/<collection>/<slug>/<filename>` exactly, since
//! templates and external links depend on them.

pub mod collections;
pub mod config;
pub mod gallery;
pub mod markdown;
pub mod media;
pub mod metadata;
pub mod output;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_helpers;
