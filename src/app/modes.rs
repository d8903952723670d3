//! Display mode types: sort key, status filter, and theme.
//!
//! These control how the favorites collection is projected for display and
//! which color scheme the rendering layer should use. They are plain value
//! types; the projection logic that consumes the first two lives in
//! [`crate::app::projection`].

use crate::domain::ReadingStatus;

/// Sort key for the projected favorites view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Lexicographic ascending on title (case-insensitive).
    Title,

    /// Lexicographic ascending on the first author.
    Author,

    /// Descending on the user's personal rating.
    Rating,

    /// Descending on the date the book was added (most recent first).
    #[default]
    DateAdded,
}

impl SortKey {
    /// Parses a sort key name. Returns `None` for unknown input.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "rating" => Some(Self::Rating),
            "dateAdded" | "date-added" | "added" => Some(Self::DateAdded),
            _ => None,
        }
    }
}

/// Filter key for the projected favorites view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every favorite passes.
    #[default]
    All,

    /// Only favorites with the given reading status pass.
    Only(ReadingStatus),
}

impl StatusFilter {
    /// Parses a filter key: `"all"` or any reading status name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value == "all" {
            Some(Self::All)
        } else {
            ReadingStatus::parse(value).map(Self::Only)
        }
    }

    /// Whether a book with the given status passes this filter.
    #[must_use]
    pub fn matches(self, status: ReadingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == wanted,
        }
    }
}

/// Color scheme flag, persisted as the literal strings `"dark"` / `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light scheme. Default, and the fallback for unrecognized stored values.
    #[default]
    Light,

    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Interprets a stored value; anything other than `"dark"` is light.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        if value == Some("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Returns the opposite theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}
