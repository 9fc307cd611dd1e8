use crate::{
    flow::TextFlow,
    font::Font,
    info::Info,
    layout::{paginate, Frame, PageSetup},
    page::{Page, SpanFont, TextRun},
    refs::{ObjectReferences, RefType},
    FlowError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref, TextStr};
use std::io::Write;
use std::ops::Range;

#[derive(Default)]
/// A document collects fonts and pages, then renders everything out with a call to
/// [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub fonts: Arena<Font>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a font to the document. Fonts are shared by every page; refer to them by the
    /// returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Append a page, returning its index within the document
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Wrap `text` with the metrics of `font`, lay the lines out according to `setup` and
    /// append as many pages as it takes. Forced breaks and blank lines in `text` are kept,
    /// except that pages left holding nothing but trailing blank lines are not added.
    ///
    /// Returns the indices of the pages that were added.
    pub fn flow_text(
        &mut self,
        font_id: Id<Font>,
        text: &str,
        setup: &PageSetup,
    ) -> Result<Range<usize>, FlowError> {
        let font = self.fonts.get(font_id).ok_or(FlowError::FontMissing)?;
        let first = self.pages.len();

        // the gutter moves the text area but keeps its width, so one width fits all pages
        let content = setup.content_box(first);
        let lines = TextFlow::new(setup.font_size, content.width())
            .policy(setup.policy)
            .wrap(text, font)?;

        let frame = Frame::for_font(content, font, setup.font_size, setup.line_spacing);
        let pagination = paginate(lines, &frame, None)?;

        let span_font = SpanFont {
            id: font_id,
            size: setup.font_size,
        };
        let mut pages = Vec::with_capacity(pagination.pages.len());
        for (offset, placed) in pagination.pages.into_iter().enumerate() {
            let mut page = Page::new(setup.size, Some(setup.margins_for(first + offset)));
            let x = page.content_box.x1;
            for line in placed {
                page.add_run(TextRun {
                    text: line.text,
                    font: span_font,
                    coords: (x, line.baseline),
                });
            }
            pages.push(page);
        }
        while pages.last().is_some_and(Page::is_blank) {
            pages.pop();
        }

        log::debug!(
            "flowed {} byte(s) of text onto {} page(s)",
            text.len(),
            pages.len()
        );
        self.pages.extend(pages);
        Ok(first..self.pages.len())
    }

    /// Write the entire document to the writer. Although this can write to arbitrary
    /// streams, the entire document is rendered in memory first.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), FlowError> {
        let Document { info, pages, fonts } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, page) in pages.iter().enumerate() {
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(language) = info.as_ref().and_then(|info| info.language.as_deref()) {
            catalog.lang(TextStr(language));
        }
        catalog.finish();

        log::debug!(
            "writing pdf with {} page(s) and {} font(s)",
            pages.len(),
            fonts.len()
        );
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn empty_documents_still_write_a_pdf() {
        let mut doc = Document::new();
        doc.set_info(Info::new().title("翻訳マニュアル").language("ja-JP").clone());
        doc.add_page(Page::new(pagesize::A4, None));

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).unwrap();
        assert!(out.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/Lang"));
    }

    #[test]
    fn flowing_requires_a_registered_font() {
        let other = Arena::<Font>::new();
        let mut doc = Document::new();
        // an id from a different, empty arena
        let stray = other.next_id();
        assert!(matches!(
            doc.flow_text(stray, "text", &PageSetup::default()),
            Err(FlowError::FontMissing)
        ));
    }
}
