//! Construction of `genpdf::Document` instances for the checklist layout.

use std::cell::Cell;
use std::rc::Rc;

use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style;
use genpdf::{Margins, Mm, PageDecorator, Size};

use crate::model::{pt_to_mm, PageSetup};

/// Converts a length in points to a `genpdf` millimetre value.
pub(crate) fn mm_from_pt(points: f64) -> Mm {
    Mm::from(printpdf::Mm(pt_to_mm(points)))
}

/// Shared, monotonically increasing number of the page currently being laid out.
///
/// The page decorator bumps the counter whenever `genpdf` starts a new page, which lets
/// elements record where they were placed.
#[derive(Clone, Debug, Default)]
pub struct PageCounter(Rc<Cell<usize>>);

impl PageCounter {
    /// Creates a counter that has not seen any page yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the 1-based number of the current page, or zero before the first page.
    pub fn current(&self) -> usize {
        self.0.get()
    }

    fn advance(&self) -> usize {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }
}

/// Builder for `genpdf::Document` instances pre-configured from a [`PageSetup`].
#[derive(Default)]
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    counter: Option<PageCounter>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies paper size and margins of the given page setup.
    pub fn with_page_setup(self, page: &PageSetup) -> Self {
        self.with_paper_size(Size::new(mm_from_pt(page.width), mm_from_pt(page.height)))
            .with_margins(Margins::trbl(
                mm_from_pt(page.margin_top),
                mm_from_pt(page.margin_right),
                mm_from_pt(page.margin_bottom),
                mm_from_pt(page.margin_left),
            ))
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Shares a page counter with the page decorator.
    pub fn with_page_counter(mut self, counter: PageCounter) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Builds a fully configured `genpdf::Document` using the given font family.
    pub fn build(self, font_family: FontFamily<FontData>) -> genpdf::Document {
        let mut document = genpdf::Document::new(font_family);

        if let Some(title) = self.title {
            document.set_title(title);
        }

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        let decorator = CountingPageDecorator {
            counter: self.counter.unwrap_or_default(),
            margins: self.margins,
        };
        document.set_page_decorator(decorator);

        document
    }
}

struct CountingPageDecorator {
    counter: PageCounter,
    margins: Option<Margins>,
}

impl PageDecorator for CountingPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        let page = self.counter.advance();
        log::debug!("Laying out page {}", page);

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::PageCounter;

    #[test]
    fn page_counter_is_shared_between_clones() {
        let counter = PageCounter::new();
        let observer = counter.clone();
        assert_eq!(observer.current(), 0);

        counter.advance();
        counter.advance();
        assert_eq!(observer.current(), 2);
    }
}
