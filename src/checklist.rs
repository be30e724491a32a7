//! The fixed compliance checklist and the operation that writes it to disk.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::{Builder, NamedTempFile};

use crate::error::{ChecklistError, Result};
use crate::model::{ContentBlock, PageSetup, Story};
use crate::render::{self, RenderedPdf};

/// File name of the generated fixture, relative to the working directory.
pub const OUTPUT_FILE_NAME: &str = "test_checklist.pdf";

/// Title shown at the top of the first page and stored in the PDF metadata.
pub const CHECKLIST_TITLE: &str = "Document Compliance Checklist";

/// Gap inserted after the title and between sections, in points.
pub const SECTION_GAP: f64 = 12.0;

/// Section headings and their bullet points, in rendering order.
pub const SECTIONS: &[(&str, &[&str])] = &[
    (
        "Project Setup Requirements",
        &[
            "Verify project charter has been approved by stakeholders",
            "Confirm budget allocation is sufficient for project scope",
            "Ensure all team members have signed confidentiality agreements",
            "Check that project timeline aligns with business objectives",
        ],
    ),
    (
        "Documentation Requirements",
        &[
            "Technical specifications document must be completed",
            "User requirements have been gathered and documented",
            "Risk assessment matrix has been created and reviewed",
            "Quality assurance plan is in place and approved",
        ],
    ),
    (
        "Compliance and Legal",
        &[
            "Data protection impact assessment completed",
            "GDPR compliance measures have been implemented",
            "Security audit has been conducted and passed",
            "Legal review of all contracts and agreements",
        ],
    ),
    (
        "Testing and Validation",
        &[
            "Unit tests have been written and executed",
            "Integration testing completed successfully",
            "User acceptance testing scheduled and planned",
            "Performance benchmarks have been established",
        ],
    ),
    (
        "Deployment Checklist",
        &[
            "Production environment is configured and ready",
            "Backup and disaster recovery procedures are tested",
            "Monitoring and alerting systems are operational",
            "Documentation for end users has been prepared",
            "Support team has been trained on the new system",
        ],
    ),
];

/// Returns the checklist as an ordered story.
pub fn checklist_story() -> Story {
    let mut story = Story::new()
        .with_block(ContentBlock::title(CHECKLIST_TITLE))
        .with_block(ContentBlock::spacer(SECTION_GAP));

    for (index, (heading, bullets)) in SECTIONS.iter().enumerate() {
        story.push(ContentBlock::heading(*heading));
        story.extend(bullets.iter().map(|bullet| ContentBlock::bullet(*bullet)));
        if index + 1 < SECTIONS.len() {
            story.push(ContentBlock::spacer(SECTION_GAP));
        }
    }

    story
}

/// Renders the checklist to PDF bytes without touching the filesystem.
pub fn render_checklist() -> Result<Vec<u8>> {
    let story = checklist_story();
    let page = PageSetup::LETTER;
    let renderer = render::select_renderer(CHECKLIST_TITLE, &page)?;
    let rendered = render::render_story(renderer, &story)?;
    finalize(&story, rendered)
}

#[cfg(feature = "bookmarks")]
fn finalize(story: &Story, rendered: RenderedPdf) -> Result<Vec<u8>> {
    let headings = story.headings();
    Ok(crate::bookmarks::apply_heading_bookmarks(
        &rendered.bytes,
        &headings,
        &rendered.heading_pages,
    )?)
}

#[cfg(not(feature = "bookmarks"))]
fn finalize(_story: &Story, rendered: RenderedPdf) -> Result<Vec<u8>> {
    Ok(rendered.bytes)
}

/// Writes the checklist to `test_checklist.pdf` in the current working directory.
///
/// Returns the absolute path of the written file.  An existing file is replaced.
pub fn build() -> Result<PathBuf> {
    build_at(OUTPUT_FILE_NAME)
}

/// Writes the checklist to `path`, resolving relative paths against the working directory.
///
/// The bytes are rendered in memory and moved into place from a temporary file in the same
/// directory, so a failed build leaves no partial file behind.
pub fn build_at(path: impl AsRef<Path>) -> Result<PathBuf> {
    let target = absolute(path.as_ref())?;
    let bytes = render_checklist()?;
    write_atomically(&target, &bytes)?;
    info!("Wrote {} ({} bytes)", target.display(), bytes.len());
    Ok(target)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().map_err(|err| ChecklistError::io(path, err))?;
    Ok(cwd.join(path))
}

/// Creates the staging file with the mode `File::create` would use, instead of owner-only.
fn staging_file(directory: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".checklist").suffix(".pdf");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    builder.tempfile_in(directory)
}

fn write_atomically(target: &Path, bytes: &[u8]) -> Result<()> {
    let directory = target.parent().unwrap_or_else(|| Path::new("."));
    let mut file = staging_file(directory).map_err(|err| ChecklistError::io(directory, err))?;
    debug!("Staging output in {}", file.path().display());

    file.write_all(bytes)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|err| ChecklistError::io(file.path(), err))?;

    file.persist(target)
        .map_err(|err| ChecklistError::io(target, err.error))?;

    if let Ok(metadata) = fs::metadata(target) {
        debug!("{} now holds {} bytes", target.display(), metadata.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_starts_with_title_and_gap() {
        let story = checklist_story();
        assert_eq!(
            &story.blocks()[..2],
            &[
                ContentBlock::title(CHECKLIST_TITLE),
                ContentBlock::spacer(SECTION_GAP)
            ]
        );
    }

    #[test]
    fn story_lists_five_sections_in_order() {
        let story = checklist_story();
        assert_eq!(
            story.headings(),
            vec![
                "Project Setup Requirements",
                "Documentation Requirements",
                "Compliance and Legal",
                "Testing and Validation",
                "Deployment Checklist",
            ]
        );
    }

    #[test]
    fn every_bullet_follows_its_heading() {
        let story = checklist_story();
        let bullets = story
            .blocks()
            .iter()
            .filter(|block| matches!(block, ContentBlock::BulletLine(_)))
            .count();
        assert_eq!(bullets, 21);

        let deployment = story
            .blocks()
            .iter()
            .position(|block| block == &ContentBlock::heading("Deployment Checklist"))
            .expect("deployment heading");
        assert_eq!(
            story.blocks()[deployment + 5],
            ContentBlock::bullet("Support team has been trained on the new system")
        );
        assert_eq!(story.blocks().len(), deployment + 6);
    }

    #[test]
    fn no_spacer_follows_the_last_section() {
        let story = checklist_story();
        assert!(!matches!(
            story.blocks().last(),
            Some(ContentBlock::Spacer(_))
        ));
    }

    #[test]
    fn relative_paths_resolve_against_working_directory() {
        let cwd = env::current_dir().expect("cwd");
        let resolved = absolute(Path::new(OUTPUT_FILE_NAME)).expect("absolute");
        assert_eq!(resolved, cwd.join(OUTPUT_FILE_NAME));
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_readable_like_a_plainly_created_one() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join(OUTPUT_FILE_NAME);
        write_atomically(&target, b"%PDF-1.3\n").expect("write");

        let reference = dir.path().join("reference.pdf");
        fs::File::create(&reference).expect("create reference");

        let mode = |path: &Path| {
            fs::metadata(path)
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777
        };
        assert_eq!(mode(&target), mode(&reference));
    }

    #[test]
    fn write_replaces_existing_file_without_leftovers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join(OUTPUT_FILE_NAME);
        write_atomically(&target, b"old").expect("first write");
        write_atomically(&target, b"new").expect("second write");

        assert_eq!(fs::read(&target).expect("read"), b"new");
        assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 1);
    }
}
