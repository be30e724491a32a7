//! Generator for the compliance checklist PDF used as a test fixture.
//!
//! [`build`] writes `test_checklist.pdf` into the working directory and returns its absolute
//! path.  Layout and PDF encoding are delegated to `genpdf` with an embedded TrueType family.

pub mod builder;
pub mod checklist;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod render;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use checklist::{build, build_at, checklist_story, render_checklist, OUTPUT_FILE_NAME};
pub use error::{ChecklistError, Result};
