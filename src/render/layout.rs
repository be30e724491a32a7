use genpdf::elements::{Paragraph, StyledElement};
use genpdf::style::Style;
use genpdf::{Alignment, Element, Margins};
use log::debug;

use crate::builder::{mm_from_pt, DocumentBuilder, PageCounter};
use crate::elements::{PagePlacements, PageTracked, Spacer};
use crate::error::Result;
use crate::model::{BlockStyle, ContentBlock, HorizontalAlignment, PageSetup};

use super::{DocumentRenderer, RenderedPdf};

/// Renderer that lays the story out with `genpdf` and an embedded TrueType family.
pub struct GenpdfRenderer {
    document: genpdf::Document,
    counter: PageCounter,
    placements: PagePlacements,
}

impl GenpdfRenderer {
    /// Creates a renderer targeting `page` that embeds `font_family`.
    pub fn new(
        title: &str,
        page: &PageSetup,
        font_family: genpdf::fonts::FontFamily<genpdf::fonts::FontData>,
    ) -> Self {
        let counter = PageCounter::new();
        let document = DocumentBuilder::new()
            .with_title(title)
            .with_page_setup(page)
            .with_page_counter(counter.clone())
            .build(font_family);

        Self {
            document,
            counter,
            placements: PagePlacements::new(),
        }
    }
}

fn alignment(value: HorizontalAlignment) -> Alignment {
    match value {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
    }
}

fn styled_text(text: String, block_style: BlockStyle) -> StyledElement<Paragraph> {
    let mut paragraph = Paragraph::new(text);
    paragraph.set_alignment(alignment(block_style.alignment));

    let mut style = Style::new().with_font_size(block_style.font_size);
    if block_style.bold {
        style.set_bold();
    }

    paragraph.styled(style)
}

fn block_padding(block_style: BlockStyle) -> Margins {
    Margins::trbl(
        mm_from_pt(block_style.space_before),
        0,
        mm_from_pt(block_style.space_after),
        0,
    )
}

impl DocumentRenderer for GenpdfRenderer {
    fn name(&self) -> &'static str {
        "genpdf"
    }

    fn push(&mut self, block: &ContentBlock) -> Result<()> {
        let (Some(text), Some(block_style)) = (block.display_text(), block.style()) else {
            if let ContentBlock::Spacer(height) = block {
                self.document.push(Spacer::new(mm_from_pt(*height)));
            }
            return Ok(());
        };

        let element = styled_text(text, block_style);
        let padding = block_padding(block_style);

        // Padding reports height even when nothing fits, so track the bare paragraph.
        if let ContentBlock::Heading(_) = block {
            let tracked = PageTracked::new(element, self.counter.clone(), &self.placements);
            self.document.push(tracked.padded(padding));
        } else {
            self.document.push(element.padded(padding));
        }
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<RenderedPdf> {
        let Self {
            document,
            counter,
            placements,
        } = *self;

        let mut bytes = Vec::new();
        document.render(&mut bytes)?;
        debug!("genpdf laid out {} page(s)", counter.current());

        Ok(RenderedPdf {
            bytes,
            heading_pages: placements.snapshot(),
        })
    }
}
