//! Data structures describing the logical content of the checklist document.
//!
//! The types in this module mirror the building blocks handed to a
//! [`DocumentRenderer`](crate::render::DocumentRenderer).  They avoid referencing
//! the rendering crates directly so that the story can be inspected in tests
//! without producing any PDF output.

/// Horizontal alignment of a text block on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
}

/// Fixed display attributes of a text-bearing block.
///
/// All distances are expressed in PDF points (1/72 inch).  Font sizes are kept
/// as `u8` because that is what the layout engine accepts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStyle {
    /// Font size in points.
    pub font_size: u8,
    /// Distance between consecutive baselines.
    pub leading: f64,
    /// Whether the bold face of the family is used.
    pub bold: bool,
    /// Horizontal alignment.
    pub alignment: HorizontalAlignment,
    /// Vertical space inserted above the block.
    pub space_before: f64,
    /// Vertical space inserted below the block.
    pub space_after: f64,
}

/// Style of the document title.
pub const TITLE_STYLE: BlockStyle = BlockStyle {
    font_size: 18,
    leading: 22.0,
    bold: true,
    alignment: HorizontalAlignment::Center,
    space_before: 0.0,
    space_after: 30.0,
};

/// Style of a section heading.
pub const HEADING_STYLE: BlockStyle = BlockStyle {
    font_size: 14,
    leading: 18.0,
    bold: true,
    alignment: HorizontalAlignment::Left,
    space_before: 20.0,
    space_after: 12.0,
};

/// Style of a bullet line.
pub const BULLET_STYLE: BlockStyle = BlockStyle {
    font_size: 10,
    leading: 12.0,
    bold: false,
    alignment: HorizontalAlignment::Left,
    space_before: 0.0,
    space_after: 0.0,
};

/// Marker rendered in front of every bullet line.
pub const BULLET_MARKER: char = '\u{2022}';

/// One unit of static text or spacing placed on the page.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentBlock {
    /// Document title.
    Title(String),
    /// Section heading.
    Heading(String),
    /// Bullet point; the text excludes the marker.
    BulletLine(String),
    /// Vertical gap with the given height in points.
    Spacer(f64),
}

impl ContentBlock {
    /// Convenience helper for building a title block.
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title(text.into())
    }

    /// Convenience helper for building a heading block.
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading(text.into())
    }

    /// Convenience helper for building a bullet line.
    pub fn bullet(text: impl Into<String>) -> Self {
        Self::BulletLine(text.into())
    }

    /// Convenience helper for building a spacer.
    pub fn spacer(height: f64) -> Self {
        Self::Spacer(height)
    }

    /// Returns the literal text of the block, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Title(text) | Self::Heading(text) | Self::BulletLine(text) => Some(text),
            Self::Spacer(_) => None,
        }
    }

    /// Returns the text as it appears on the page; bullet lines gain the marker and a space.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::BulletLine(text) => Some(format!("{} {}", BULLET_MARKER, text)),
            other => other.text().map(str::to_owned),
        }
    }

    /// Returns the display attributes of text-bearing blocks.
    pub fn style(&self) -> Option<BlockStyle> {
        match self {
            Self::Title(_) => Some(TITLE_STYLE),
            Self::Heading(_) => Some(HEADING_STYLE),
            Self::BulletLine(_) => Some(BULLET_STYLE),
            Self::Spacer(_) => None,
        }
    }
}

/// Ordered sequence of content blocks.  Insertion order is rendering order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Story {
    blocks: Vec<ContentBlock>,
}

impl Story {
    /// Creates an empty story.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block and returns the updated story.
    pub fn with_block(mut self, block: ContentBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Appends a block in place.
    pub fn push(&mut self, block: ContentBlock) {
        self.blocks.push(block);
    }

    /// Returns the blocks in rendering order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Returns the heading texts in rendering order.
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Extend<ContentBlock> for Story {
    fn extend<I: IntoIterator<Item = ContentBlock>>(&mut self, iter: I) {
        self.blocks.extend(iter);
    }
}

/// Page geometry, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl PageSetup {
    /// US Letter with one-inch side and top margins and a quarter-inch bottom margin.
    pub const LETTER: PageSetup = PageSetup {
        width: 612.0,
        height: 792.0,
        margin_top: 72.0,
        margin_right: 72.0,
        margin_bottom: 18.0,
        margin_left: 72.0,
    };
}

/// Converts a length in points to millimetres.
pub fn pt_to_mm(points: f64) -> f64 {
    points * 25.4 / 72.0
}
