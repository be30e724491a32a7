//! Error types for checklist generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[cfg(feature = "bookmarks")]
use crate::bookmarks::BookmarkError;

/// Result type alias for checklist operations.
pub type Result<T> = std::result::Result<T, ChecklistError>;

/// Errors that can occur while rendering or writing the checklist.
#[derive(Error, Debug)]
pub enum ChecklistError {
    /// The output file could not be written.
    #[error("Failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No usable TrueType font family could be loaded.
    #[error("No usable font family")]
    Fonts(#[source] genpdf::error::Error),

    /// The layout engine rejected the document.
    #[error("Layout failed")]
    Layout(#[from] genpdf::error::Error),

    /// Section outlines could not be embedded into the rendered bytes.
    #[cfg(feature = "bookmarks")]
    #[error("Failed to add section bookmarks")]
    Bookmarks(#[from] BookmarkError),
}

impl ChecklistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
