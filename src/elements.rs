//! Element implementations built on top of `genpdf` primitives.
//!
//! `genpdf` ships paragraphs and breaks measured in lines; the checklist needs a gap of an exact
//! height and a way to learn on which page a heading ended up.

use std::cell::RefCell;
use std::rc::Rc;

use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Element, Mm, RenderResult, Size};

use crate::builder::PageCounter;

/// Fixed-height vertical gap.
///
/// If the remaining area is shorter than the gap the spacer consumes what is left and the next
/// element starts on a fresh page; the gap itself is not carried over.
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    /// Creates a spacer of the given height.
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let mut result = RenderResult::default();
        let height = if self.height > available {
            available
        } else {
            self.height
        };
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// Slots receiving the page number of each tracked element, in registration order.
#[derive(Clone, Debug, Default)]
pub struct PagePlacements(Rc<RefCell<Vec<Option<usize>>>>);

impl PagePlacements {
    /// Creates an empty placement record.
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self) -> usize {
        let mut slots = self.0.borrow_mut();
        slots.push(None);
        slots.len() - 1
    }

    fn record(&self, slot: usize, page: usize) {
        if let Some(entry) = self.0.borrow_mut().get_mut(slot) {
            entry.get_or_insert(page);
        }
    }

    /// Returns the recorded pages; `None` for elements that were never placed.
    pub fn snapshot(&self) -> Vec<Option<usize>> {
        self.0.borrow().clone()
    }
}

/// Wraps an element and records the page on which it first produced output.
pub struct PageTracked<E: Element> {
    inner: E,
    counter: PageCounter,
    placements: PagePlacements,
    slot: usize,
}

impl<E: Element> PageTracked<E> {
    /// Wraps `inner`, reserving a slot in `placements`.
    pub fn new(inner: E, counter: PageCounter, placements: &PagePlacements) -> Self {
        let slot = placements.register();
        Self {
            inner,
            counter,
            placements: placements.clone(),
            slot,
        }
    }
}

impl<E: Element> Element for PageTracked<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let result = self.inner.render(context, area, style)?;
        if result.size.height > Mm::default() {
            self.placements.record(self.slot, self.counter.current());
        }
        Ok(result)
    }
}
