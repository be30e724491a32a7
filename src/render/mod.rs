//! Rendering of a [`Story`] into PDF bytes.
//!
//! The [`DocumentRenderer`] trait is the seam between the checklist content and the crates that
//! perform layout and PDF encoding.  [`GenpdfRenderer`] lays text out with an embedded TrueType
//! family.

mod layout;

pub use layout::GenpdfRenderer;

use log::{debug, info};

use crate::error::{ChecklistError, Result};
use crate::fonts;
use crate::model::{ContentBlock, PageSetup, Story};

/// Output of a renderer.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// The encoded PDF document.
    pub bytes: Vec<u8>,
    /// 1-based page of each heading in story order, when the renderer could determine it.
    pub heading_pages: Vec<Option<usize>>,
}

/// A page-layout and PDF-encoding backend.
///
/// Construction targets a page setup; blocks are appended in rendering order and the document
/// is encoded exactly once by [`finish`](DocumentRenderer::finish).
pub trait DocumentRenderer {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Appends a block to the end of the document.
    fn push(&mut self, block: &ContentBlock) -> Result<()>;

    /// Lays out the document and encodes it.
    fn finish(self: Box<Self>) -> Result<RenderedPdf>;
}

/// Creates the layout renderer with the default font family.
///
/// Fails with [`ChecklistError::Fonts`] when no TrueType family can be loaded.
pub fn select_renderer(title: &str, page: &PageSetup) -> Result<Box<dyn DocumentRenderer>> {
    let family = fonts::default_font_family().map_err(ChecklistError::Fonts)?;
    debug!("Font family loaded for '{}'", title);
    Ok(Box::new(GenpdfRenderer::new(title, page, family)))
}

/// Feeds every block of `story` to `renderer` and encodes the result.
pub fn render_story(
    mut renderer: Box<dyn DocumentRenderer>,
    story: &Story,
) -> Result<RenderedPdf> {
    for block in story.blocks() {
        renderer.push(block)?;
    }

    let name = renderer.name();
    let rendered = renderer.finish()?;
    info!(
        "Rendered {} blocks with the {} renderer ({} bytes)",
        story.blocks().len(),
        name,
        rendered.bytes.len()
    );
    Ok(rendered)
}
