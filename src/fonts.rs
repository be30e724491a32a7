//! TrueType font discovery for the layout renderer.
//!
//! The layout engine needs real font files for glyph metrics.  The search tries an explicitly
//! configured directory first, then bundled `assets/fonts` directories, and finally a few
//! sans-serif families that commonly ship with the operating system.  When none is found the
//! `NotFound` error is returned to the caller.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::debug;

/// Environment variable pointing at a directory with the bundled font files.
pub const FONTS_DIR_ENV: &str = "CHECKLIST_FONTS_DIR";

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

struct SystemFamily {
    name: &'static str,
    directories: &'static [&'static str],
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const SYSTEM_FAMILIES: &[SystemFamily] = &[
    SystemFamily {
        name: "Liberation Sans",
        directories: &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-sans",
            "/usr/share/fonts/liberation",
        ],
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
        italic: "LiberationSans-Italic.ttf",
        bold_italic: "LiberationSans-BoldItalic.ttf",
    },
    SystemFamily {
        name: "DejaVu Sans",
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/TTF",
        ],
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
    },
    SystemFamily {
        name: "Arial",
        directories: &[
            "C:\\Windows\\Fonts",
            "/Library/Fonts",
            "/System/Library/Fonts/Supplemental",
        ],
        regular: "arial.ttf",
        bold: "arialbd.ttf",
        italic: "ariali.ttf",
        bold_italic: "arialbi.ttf",
    },
];

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn not_found(message: String, detail: &str) -> Error {
    Error::new(message, io::Error::new(io::ErrorKind::NotFound, detail.to_owned()))
}

fn resolve_font_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    Err(not_found(
        format!(
            "Unable to locate bundled font directory. Checked: {}. Set {} to a directory with the Roboto family.",
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        "bundled fonts directory not found",
    ))
}

fn load_bundled_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory()?;
    debug!("Loading bundled fonts from {}", directory.display());

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load default font family '{}' from {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn system_family_directory(family: &SystemFamily) -> Option<PathBuf> {
    family
        .directories
        .iter()
        .map(PathBuf::from)
        .find(|directory| directory.join(family.regular).is_file())
}

fn load_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!("Failed to load {} font at {}: {}", style, path.display(), err),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn load_system_family(family: &SystemFamily) -> Result<FontFamily<FontData>, Error> {
    let directory = system_family_directory(family).ok_or_else(|| {
        not_found(
            format!("System font family '{}' not installed", family.name),
            "system font family not found",
        )
    })?;
    debug!("Loading system family '{}' from {}", family.name, directory.display());

    Ok(FontFamily {
        regular: load_font(&directory, family.regular, "regular")?,
        bold: load_font(&directory, family.bold, "bold")?,
        italic: load_font(&directory, family.italic, "italic")?,
        bold_italic: load_font(&directory, family.bold_italic, "bold italic")?,
    })
}

fn system_font_family() -> Result<FontFamily<FontData>, Error> {
    let mut failures = Vec::new();

    for family in SYSTEM_FAMILIES {
        match load_system_family(family) {
            Ok(loaded) => return Ok(loaded),
            Err(err) if fonts_missing(&err) => failures.push(err.to_string()),
            Err(err) => return Err(err),
        }
    }

    Err(not_found(
        format!("No system font family available: {}", failures.join("; ")),
        "system fonts not found",
    ))
}

/// Indicates whether a font error means the files are absent rather than broken.
pub fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the bundled Roboto family if available and falls back to installed system families.
///
/// Errors caused by absent files keep the `NotFound` kind so that [`fonts_missing`] can detect
/// them.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    match load_bundled_font_family() {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match system_font_family() {
            Ok(fallback) => {
                debug!("Bundled fonts unavailable ({}); using a system family", err);
                Ok(fallback)
            }
            Err(fallback_err) => {
                debug!(
                    "Bundled fonts unavailable ({}); system fallback failed: {}",
                    err, fallback_err
                );
                Err(fallback_err)
            }
        },
        Err(err) => Err(err),
    }
}

/// Returns true when either the bundled fonts or one of the system families can be found.
pub fn default_fonts_available() -> bool {
    resolve_font_directory().is_ok()
        || SYSTEM_FAMILIES
            .iter()
            .any(|family| system_family_directory(family).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_reported_as_not_found() {
        let missing = PathBuf::from("/__checklist_missing_fonts__");
        assert_eq!(missing_font_files(&missing).len(), FONT_FILES.len());

        let err = not_found("gone".to_owned(), "gone");
        assert!(fonts_missing(&err));
    }

    #[test]
    fn broken_font_file_is_not_treated_as_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").expect("write broken font");

        let Err(err) = load_font(dir.path(), "broken.ttf", "regular") else {
            panic!("a text file must not load as a font");
        };
        assert!(!fonts_missing(&err));
    }

    #[test]
    fn absent_font_file_is_treated_as_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let Err(err) = load_font(dir.path(), "absent.ttf", "regular") else {
            panic!("an absent file must not load as a font");
        };
        assert!(fonts_missing(&err));
    }
}
