use std::fs;

use checklist_fixture::fonts;
use checklist_fixture::model::PageSetup;
use checklist_fixture::render;
use checklist_fixture::{build_at, checklist_story, render_checklist, ChecklistError};

fn assert_structurally_valid(bytes: &[u8]) -> lopdf::Document {
    assert!(bytes.starts_with(b"%PDF-"), "missing PDF header");

    let tail = &bytes[bytes.len().saturating_sub(1024)..];
    let tail = String::from_utf8_lossy(tail);
    assert!(tail.contains("startxref"), "missing startxref");
    assert!(tail.trim_end().ends_with("%%EOF"), "missing end-of-file marker");

    let document = lopdf::Document::load_mem(bytes).expect("lopdf parses rendered bytes");
    assert!(
        document.trailer.get(b"Root").is_ok(),
        "trailer should reference the catalog"
    );
    assert!(!document.get_pages().is_empty(), "document has no pages");
    document
}

fn render_sample_checklist() -> Option<Vec<u8>> {
    if !fonts::default_fonts_available() {
        return None;
    }

    Some(render_checklist().expect("render checklist"))
}

#[test]
fn renders_structurally_valid_pdf() {
    let Some(bytes) = render_sample_checklist() else {
        return;
    };
    assert_structurally_valid(&bytes);
}

#[test]
fn every_heading_is_placed_on_the_first_page() {
    if !fonts::default_fonts_available() {
        return;
    }

    let story = checklist_story();
    let renderer = render::select_renderer("Checklist", &PageSetup::LETTER).expect("renderer");
    let rendered = render::render_story(renderer, &story).expect("render story");

    assert_eq!(rendered.heading_pages.len(), 5);
    assert!(rendered.heading_pages.iter().all(Option::is_some));
    assert!(rendered.heading_pages.iter().all(|page| *page == Some(1)));

    let document = assert_structurally_valid(&rendered.bytes);
    assert_eq!(document.get_pages().len(), 1, "checklist fits on one page");
}

#[cfg(feature = "bookmarks")]
#[test]
fn outline_lists_section_headings_in_order() {
    use lopdf::Object;

    let Some(bytes) = render_sample_checklist() else {
        return;
    };
    let document = assert_structurally_valid(&bytes);

    let catalog = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .and_then(|id| document.get_object(id))
        .and_then(Object::as_dict)
        .expect("catalog dictionary");
    let outlines = catalog
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .and_then(|id| document.get_object(id))
        .and_then(Object::as_dict)
        .expect("outline root");

    let mut titles = Vec::new();
    let mut next = outlines.get(b"First").and_then(Object::as_reference).ok();
    while let Some(id) = next {
        let entry = document
            .get_object(id)
            .and_then(Object::as_dict)
            .expect("outline entry");
        let title = entry
            .get(b"Title")
            .and_then(Object::as_str)
            .expect("outline title");
        titles.push(String::from_utf8_lossy(title).into_owned());
        next = entry.get(b"Next").and_then(Object::as_reference).ok();
    }

    assert_eq!(
        titles,
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
fn repeated_builds_overwrite_the_same_file() {
    if !fonts::default_fonts_available() {
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("test_checklist.pdf");

    let first = build_at(&target).expect("first build");
    let second = build_at(&target).expect("second build");

    assert_eq!(first, target);
    assert_eq!(second, target);
    assert!(fs::metadata(&target).expect("metadata").len() > 0);

    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .collect::<Result<_, _>>()
        .expect("dir entries");
    assert_eq!(entries.len(), 1, "no staging files should remain");
}

#[test]
fn unwritable_destination_reports_failure() {
    if !fonts::default_fonts_available() {
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("missing").join("test_checklist.pdf");

    let err = build_at(&target).expect_err("build into a missing directory must fail");
    assert!(matches!(err, ChecklistError::Io { .. }), "unexpected error: {err}");
    assert!(!target.exists(), "no file may be left behind");
}

#[test]
fn missing_fonts_are_reported_instead_of_a_file() {
    if fonts::default_fonts_available() {
        return;
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("test_checklist.pdf");

    let err = build_at(&target).expect_err("build without fonts must fail");
    assert!(matches!(err, ChecklistError::Fonts(_)), "unexpected error: {err}");
    assert!(!target.exists());
}
