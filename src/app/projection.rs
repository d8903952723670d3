//! View projection: the sorted, filtered display list.
//!
//! [`project`] is a pure function from the favorites collection and the
//! current display modes to the list the rendering layer should show. It is
//! recomputed on every read and never mutates the underlying collection.
//!
//! All comparators are applied with a stable sort, so entries that compare
//! equal keep their insertion order, which is the only tiebreak.

use crate::app::modes::{SortKey, StatusFilter};
use crate::domain::FavoriteBook;

/// Computes the display list for the given modes.
///
/// Filters first (by reading status, or everything for
/// [`StatusFilter::All`]), then sorts by the selected key. Title and author
/// comparisons are case-insensitive.
#[must_use]
pub fn project(
    favorites: &[FavoriteBook],
    sort_key: SortKey,
    filter: StatusFilter,
) -> Vec<FavoriteBook> {
    let mut shelf: Vec<FavoriteBook> = favorites
        .iter()
        .filter(|book| filter.matches(book.reading_status))
        .cloned()
        .collect();

    match sort_key {
        SortKey::Title => {
            shelf.sort_by(|a, b| collate(&a.entry.title).cmp(&collate(&b.entry.title)));
        }
        SortKey::Author => {
            shelf.sort_by(|a, b| collate(first_author(a)).cmp(&collate(first_author(b))));
        }
        SortKey::Rating => {
            shelf.sort_by(|a, b| b.personal_rating.cmp(&a.personal_rating));
        }
        SortKey::DateAdded => {
            shelf.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        }
    }

    shelf
}

/// Collation key for ordering titles and author names.
///
/// Unicode-aware case folding via `str::to_lowercase`, compared byte-wise.
/// Not locale-aware: accented characters sort after ASCII rather than next to
/// their base letter. Acceptable for a personal shelf; proper collation would
/// need an ICU binding.
fn collate(text: &str) -> String {
    text.to_lowercase()
}

/// The normalized authors list is never empty, but stay defensive here since
/// the collection may have been hand-edited on disk.
fn first_author(book: &FavoriteBook) -> &str {
    book.entry.authors.first().map_or("", String::as_str)
}
