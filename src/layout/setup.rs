use super::Margins;
use crate::flow::BreakPolicy;
use crate::pagesize::{self, PageSize};
use crate::rect::Rect;
use crate::units::{In, Pt};

/// How flowed text is set on pages: paper, margins, type size and wrapping rules.
///
/// Defaults to 11pt text on A4 with ¾ inch margins, single spaced, wrapping with
/// [BreakPolicy::Auto].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub size: PageSize,
    pub margins: Margins,
    /// Extra space on the binding edge, alternating sides page by page
    pub gutter: Option<Pt>,
    pub font_size: Pt,
    /// Multiplier applied to the font's natural line height
    pub line_spacing: f32,
    pub policy: BreakPolicy,
}

impl Default for PageSetup {
    fn default() -> Self {
        PageSetup {
            size: pagesize::A4,
            margins: Margins::all(In(0.75)),
            gutter: None,
            font_size: Pt(11.0),
            line_spacing: 1.0,
            policy: BreakPolicy::Auto,
        }
    }
}

impl PageSetup {
    pub fn new() -> PageSetup {
        PageSetup::default()
    }

    pub fn size(mut self, size: PageSize) -> Self {
        self.size = size;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn gutter<D: Into<Pt>>(mut self, gutter: D) -> Self {
        self.gutter = Some(gutter.into());
        self
    }

    pub fn font_size<D: Into<Pt>>(mut self, size: D) -> Self {
        self.font_size = size.into();
        self
    }

    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn policy(mut self, policy: BreakPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn media_box(&self) -> Rect {
        Rect::from_size(self.size.0, self.size.1)
    }

    /// The margins of the page at `page_index` within the document, gutter included
    pub fn margins_for(&self, page_index: usize) -> Margins {
        match self.gutter {
            Some(gutter) => self.margins.with_gutter(gutter, page_index),
            None => self.margins,
        }
    }

    /// Where text goes on the page at `page_index`. Every page has the same text width;
    /// only its horizontal position moves with the gutter.
    pub fn content_box(&self, page_index: usize) -> Rect {
        self.margins_for(page_index).content_box(self.media_box())
    }
}
