//! Platform path resolution for the durable data file.
//!
//! Resolves the default location of the JSON store following the XDG base
//! directory convention: `$XDG_DATA_HOME/shelfmark`, falling back to
//! `$HOME/.local/share/shelfmark`, and finally to the working directory when
//! neither variable is set (e.g. stripped-down containers).

use std::path::PathBuf;

/// File name of the JSON store inside the data directory.
const DATA_FILE_NAME: &str = "shelfmark.json";

/// Returns the data directory for Shelfmark storage.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("shelfmark");
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("shelfmark");
    }
    PathBuf::from(".")
}

/// Returns the default path of the JSON store file.
#[must_use]
pub fn default_data_file() -> PathBuf {
    default_data_dir().join(DATA_FILE_NAME)
}
