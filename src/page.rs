use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::FlowError;
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf};
use std::io::Write;

/// Which font, and at what size, a run of text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single line of text positioned on a page. `coords` is the start of the baseline.
#[derive(Clone, PartialEq, Debug)]
pub struct TextRun {
    pub text: String,
    pub font: SpanFont,
    pub coords: (Pt, Pt),
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content is meant to live, i.e. within the margins
    pub content_box: Rect,
    pub runs: Vec<TextRun>,
}

impl Page {
    /// Create an empty page. Without margins the content box covers the whole page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let media_box = Rect::from_size(size.0, size.1);
        let content_box = margins.unwrap_or_default().content_box(media_box);
        Page {
            media_box,
            content_box,
            runs: Vec::new(),
        }
    }

    /// Add a run of text. Empty runs draw nothing and are dropped.
    pub fn add_run(&mut self, run: TextRun) {
        if !run.text.is_empty() {
            self.runs.push(run);
        }
    }

    /// A page with no text on it
    pub fn is_blank(&self) -> bool {
        self.runs.is_empty()
    }

    /// Render the page's content stream
    #[allow(clippy::write_with_newline)]
    pub(crate) fn render(&self, fonts: &Arena<Font>) -> Result<Vec<u8>, FlowError> {
        let mut content: Vec<u8> = Vec::new();
        if self.runs.is_empty() {
            return Ok(content);
        }

        write!(content, "q\n0 g\nBT\n")?;
        let mut current: Option<SpanFont> = None;
        let mut origin = (Pt(0.0), Pt(0.0));
        for run in self.runs.iter() {
            let font = fonts.get(run.font.id).ok_or(FlowError::FontMissing)?;
            if current != Some(run.font) {
                write!(content, "/F{} {} Tf\n", run.font.id.index(), run.font.size.0)?;
                current = Some(run.font);
            }

            // Td is relative to the start of the previous line
            let (x, y) = run.coords;
            write!(content, "{} {} Td\n", (x - origin.0).0, (y - origin.1).0)?;
            origin = run.coords;

            write!(content, "<")?;
            for gid in font.encode(&run.text) {
                write!(content, "{gid:04x}")?;
            }
            write!(content, "> Tj\n")?;
        }
        write!(content, "ET\nQ\n")?;

        Ok(content)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), FlowError> {
        let rendered = self.render(fonts)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));
        let compressed = compress_to_vec_zlib(
            &rendered,
            CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);

        let id = refs.get_or_gen(RefType::Page(page_index));
        let parent = refs.get_or_gen(RefType::PageTree);
        let font_refs: Vec<(usize, pdf_writer::Ref)> = fonts
            .iter()
            .map(|(font_id, _)| {
                let index = font_id.index();
                (index, refs.get_or_gen(RefType::Font(index)))
            })
            .collect();

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize;

    #[test]
    fn margins_define_the_content_box() {
        let page = Page::new(pagesize::LETTER, Some(Margins::all(Pt(72.0))));
        assert_eq!(page.content_box.x1, Pt(72.0));
        assert_eq!(page.content_box.y2, Pt(11.0 * 72.0 - 72.0));

        let bare = Page::new(pagesize::LETTER, None);
        assert_eq!(bare.content_box, bare.media_box);
    }

    #[test]
    fn blank_pages_render_nothing() {
        let page = Page::new(pagesize::A5, None);
        let fonts: Arena<Font> = Arena::new();
        assert!(page.is_blank());
        assert!(page.render(&fonts).unwrap().is_empty());
    }

    #[test]
    fn runs_render_as_relative_moves_and_glyph_ids() {
        let font = Font::load(include_bytes!("../tests/assets/DejaVuSans.ttf").to_vec()).unwrap();
        let (a, b) = (font.glyph_id('A'), font.glyph_id('B'));
        let mut fonts = Arena::new();
        let id = fonts.alloc(font);
        let span = SpanFont { id, size: Pt(12.0) };

        let mut page = Page::new(pagesize::A5, None);
        for (text, y) in [("AB", 500.0), ("", 486.0), ("BA", 472.0)] {
            page.add_run(TextRun {
                text: text.to_string(),
                font: span,
                coords: (Pt(36.0), Pt(y)),
            });
        }
        assert_eq!(page.runs.len(), 2);

        let content = String::from_utf8(page.render(&fonts).unwrap()).unwrap();
        assert_eq!(
            content,
            format!(
                "q\n0 g\nBT\n/F0 12 Tf\n36 500 Td\n<{a:04x}{b:04x}> Tj\n0 -28 Td\n<{b:04x}{a:04x}> Tj\nET\nQ\n"
            )
        );
    }
}
