//! Section outline support built on top of `lopdf`.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

/// Errors that can occur while embedding bookmarks into a rendered PDF document.
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed or written by `lopdf`.
    #[error("Failed to process PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    /// A required catalog entry was missing from the document trailer.
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    /// The catalog object was not a dictionary, preventing outline injection.
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    /// A heading referenced a page that does not exist in the rendered document.
    #[error("Heading {heading_index} refers to missing page {page_number}")]
    MissingPage {
        heading_index: usize,
        page_number: usize,
    },
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

/// Adds a flat outline with one entry per heading.
///
/// Each entry carries a `/Dest [page /Fit]` pointing at the page recorded for the heading.
/// Headings without a recorded page are skipped; when none has one the input is returned as is.
pub fn apply_heading_bookmarks(
    pdf_bytes: &[u8],
    headings: &[&str],
    heading_pages: &[Option<usize>],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;

    let pages = document.get_pages();
    let mut outline_entries =
        collect_outline_entries(&mut document, headings, heading_pages, &pages)?;

    if outline_entries.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let outlines_id = document.new_object_id();
    link_outline_entries(outlines_id, &mut document, &mut outline_entries);
    insert_outlines_root(outlines_id, &mut document, &outline_entries)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    log::debug!("Embedded {} heading bookmarks", outline_entries.len());
    Ok(buffer)
}

struct OutlineEntry {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: String,
}

fn collect_outline_entries(
    document: &mut Document,
    headings: &[&str],
    heading_pages: &[Option<usize>],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, BookmarkError> {
    let mut entries = Vec::new();

    for (index, (title, maybe_page)) in headings.iter().zip(heading_pages.iter()).enumerate() {
        let Some(page_number) = *maybe_page else {
            continue;
        };
        let page_ref = u32::try_from(page_number)
            .ok()
            .and_then(|number| pages.get(&number).copied())
            .ok_or(BookmarkError::MissingPage {
                heading_index: index,
                page_number,
            })?;

        entries.push(OutlineEntry {
            object_id: document.new_object_id(),
            page_ref,
            title: (*title).to_string(),
        });
    }

    Ok(entries)
}

fn link_outline_entries(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &mut [OutlineEntry],
) {
    for index in 0..entries.len() {
        let mut dictionary = Dictionary::new();
        dictionary.set("Title", Object::string_literal(entries[index].title.as_str()));
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(entries[index].page_ref),
                Object::Name("Fit".into()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));

        if index > 0 {
            dictionary.set("Prev", Object::Reference(entries[index - 1].object_id));
        }

        if index + 1 < entries.len() {
            dictionary.set("Next", Object::Reference(entries[index + 1].object_id));
        }

        document
            .objects
            .insert(entries[index].object_id, Object::Dictionary(dictionary));
    }
}

fn insert_outlines_root(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &[OutlineEntry],
) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let mut dictionary = Dictionary::new();
    dictionary.set("Type", Object::Name("Outlines".into()));
    dictionary.set("Count", Object::Integer(entries.len() as i64));
    if let Some(first) = entries.first() {
        dictionary.set("First", Object::Reference(first.object_id));
    }
    if let Some(last) = entries.last() {
        dictionary.set("Last", Object::Reference(last.object_id));
    }

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name("UseOutlines".into()));

    document
        .objects
        .insert(outlines_id, Object::Dictionary(dictionary));

    Ok(())
}
