//! Book domain models.
//!
//! This module defines the two core record types of the engine: [`CatalogEntry`],
//! the ephemeral shape produced by a catalog search, and [`FavoriteBook`], the
//! persisted shape the user owns and annotates. The separation keeps a clear
//! boundary between what the remote catalog provides and what the user adds on
//! top (rating, status, notes, date added).
//!
//! Both types serialize with camelCase field names so the on-disk favorites
//! collection stays byte-compatible with the historical JSON format
//! (`dateAdded`, `personalRating`, `readingStatus`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single result from the external book catalog.
///
/// Produced by the catalog search client after normalization: every field is
/// guaranteed filled per the default rules (placeholder title and author,
/// zeroed numeric fields), so consumers never need to re-check for absent
/// values. Immutable once produced; never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Stable identifier assigned by the catalog.
    pub id: String,

    /// Book title; `"Unknown Title"` when the catalog omits it.
    pub title: String,

    /// Ordered author list, never empty; a single `"Unknown Author"` entry
    /// stands in when the catalog provides none.
    pub authors: Vec<String>,

    /// Publication date as provided by the catalog, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    /// Cover thumbnail URL, if the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Subject categories; `["Uncategorized"]` when the catalog omits them.
    pub categories: Vec<String>,

    /// Page count, 0 when unknown.
    #[serde(default)]
    pub page_count: u32,

    /// Catalog-wide average rating in 0–5, 0 when unknown.
    #[serde(default)]
    pub average_rating: f32,
}

/// Reading status of a favorite book.
///
/// Serialized in kebab-case (`want-to-read`, `reading`, `finished`) to match
/// the stored collection format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingStatus {
    /// On the shelf but not started. Default for newly added favorites.
    #[default]
    WantToRead,

    /// Currently being read.
    Reading,

    /// Finished reading.
    Finished,
}

impl ReadingStatus {
    /// Returns the kebab-case string form used on disk and in filter keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WantToRead => "want-to-read",
            Self::Reading => "reading",
            Self::Finished => "finished",
        }
    }

    /// Parses the kebab-case string form. Returns `None` for unknown input.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "want-to-read" => Some(Self::WantToRead),
            "reading" => Some(Self::Reading),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }
}

/// A book in the user's favorites collection.
///
/// Carries all [`CatalogEntry`] fields (flattened in serialized form) plus the
/// user-owned annotation fields. `date_added` is set exactly once at insertion
/// and never changes; the remaining annotation fields are mutable through the
/// favorites store only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteBook {
    /// The catalog fields this favorite was created from.
    #[serde(flatten)]
    pub entry: CatalogEntry,

    /// When the book was added to favorites. Immutable after insertion.
    pub date_added: DateTime<Utc>,

    /// The user's own star rating, 0–5. 0 means unrated.
    pub personal_rating: u8,

    /// Where the user is with this book.
    pub reading_status: ReadingStatus,

    /// Free-text notes.
    pub notes: String,
}

impl FavoriteBook {
    /// Creates a favorite from a catalog entry with default annotations.
    ///
    /// Sets `personal_rating` to 0, `reading_status` to
    /// [`ReadingStatus::WantToRead`], `notes` to empty, and `date_added` to the
    /// supplied timestamp.
    #[must_use]
    pub fn from_entry(entry: CatalogEntry, added_at: DateTime<Utc>) -> Self {
        Self {
            entry,
            date_added: added_at,
            personal_rating: 0,
            reading_status: ReadingStatus::default(),
            notes: String::new(),
        }
    }

    /// Returns the identity key of this favorite (the catalog id).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.entry.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: "The Hobbit".to_string(),
            authors: vec!["J. R. R. Tolkien".to_string()],
            published_date: Some("1937".to_string()),
            image_url: None,
            categories: vec!["Fantasy".to_string()],
            page_count: 310,
            average_rating: 4.5,
        }
    }

    #[test]
    fn from_entry_applies_defaults() {
        let before = Utc::now();
        let favorite = FavoriteBook::from_entry(entry("b1"), Utc::now());

        assert_eq!(favorite.personal_rating, 0);
        assert_eq!(favorite.reading_status, ReadingStatus::WantToRead);
        assert_eq!(favorite.notes, "");
        assert!(favorite.date_added >= before);
        assert_eq!(favorite.id(), "b1");
    }

    #[test]
    fn favorite_serializes_flattened_camel_case() {
        let favorite = FavoriteBook::from_entry(entry("b1"), Utc::now());
        let value = serde_json::to_value(&favorite).unwrap();

        assert_eq!(value["id"], "b1");
        assert_eq!(value["pageCount"], 310);
        assert_eq!(value["readingStatus"], "want-to-read");
        assert_eq!(value["personalRating"], 0);
        assert!(value.get("dateAdded").is_some());
    }

    #[test]
    fn favorite_round_trips_through_json() {
        let favorite = FavoriteBook::from_entry(entry("b2"), Utc::now());
        let json = serde_json::to_string(&favorite).unwrap();
        let back: FavoriteBook = serde_json::from_str(&json).unwrap();
        assert_eq!(back, favorite);
    }

    #[test]
    fn reading_status_parse_rejects_unknown() {
        assert_eq!(ReadingStatus::parse("reading"), Some(ReadingStatus::Reading));
        assert_eq!(ReadingStatus::parse("abandoned"), None);
    }
}
