//! Content-layer schema: declared defaults and enum coercion.
//!
//! Loaders produce entries; the content layer checks them before they reach
//! the renderer. Gallery metadata is hand-written JSON, so a typo such as
//! `"cardSize": "tal"` must fail the build instead of silently rendering a
//! normal card.

use crate::gallery::GalleryEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_ASPECT_RATIO: &str = "3 / 4";
pub const DEFAULT_ORDER: f64 = 0.0;

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("{entry}: cardSize must be one of normal, tall, wide (got '{value}')")]
    CardSize { entry: String, value: String },
    #[error("{entry}: {field} must not be empty")]
    Empty { entry: String, field: &'static str },
}

/// Card layout hint for the portfolio grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    #[default]
    Normal,
    Tall,
    Wide,
}

impl CardSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardSize::Normal => "normal",
            CardSize::Tall => "tall",
            CardSize::Wide => "wide",
        }
    }
}

impl fmt::Display for CardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(CardSize::Normal),
            "tall" => Ok(CardSize::Tall),
            "wide" => Ok(CardSize::Wide),
            other => Err(other.to_string()),
        }
    }
}

/// Check a gallery entry against the gallery schema.
///
/// `title`, `img` and `images` are always present by construction; only the
/// values copied from metadata need checking.
pub fn check_gallery_entry(entry: &GalleryEntry) -> Result<(), SchemaError> {
    if entry.title.is_empty() {
        return Err(SchemaError::Empty {
            entry: entry.id.clone(),
            field: "title",
        });
    }
    entry
        .card_size
        .parse::<CardSize>()
        .map_err(|value| SchemaError::CardSize {
            entry: entry.id.clone(),
            value,
        })?;
    Ok(())
}

/// Check every entry of a gallery collection, stopping at the first failure.
pub fn check_gallery_entries(entries: &[GalleryEntry]) -> Result<(), SchemaError> {
    entries.iter().try_for_each(check_gallery_entry)
}
