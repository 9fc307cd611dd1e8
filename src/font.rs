use crate::{
    metrics::{GlyphMetrics, MetricsError},
    refs::{ObjectReferences, RefType},
    FlowError, Pt,
};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A parsed TrueType / OpenType font.
///
/// Fonts serve two purposes: they measure text for the wrapping engine (via
/// [GlyphMetrics]) and they are embedded in full in the generated PDF, so what gets
/// measured is exactly what gets drawn. Characters the font has no glyph for are
/// measured and drawn as the replacement glyph (U+FFFD, or `.notdef` when the font
/// lacks one too).
pub struct Font {
    pub face: OwnedFace,
}

/// One entry of the font's unicode character map
struct GlyphEntry {
    ch: char,
    advance: u16,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, FlowError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn find_name(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FAMILY)
    }

    /// Font units to points at the given size
    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font. Usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Extra space the font asks for between lines
    pub fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().line_gap() as f32
    }

    /// How far apart consecutive baselines are by default
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// The glyph drawn for `ch`, falling back to the replacement glyph
    pub fn glyph_id(&self, ch: char) -> u16 {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .map(|gid| gid.0)
            .unwrap_or(0)
    }

    /// Whether the font has a real glyph for `ch`
    pub fn has_glyph(&self, ch: char) -> bool {
        self.face().glyph_index(ch).is_some()
    }

    /// Glyph ids for everything drawable in `text`. Control characters are skipped.
    pub fn encode(&self, text: &str) -> Vec<u16> {
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| {
                if !self.has_glyph(ch) {
                    log::warn!("font has no glyph for {ch:?}, drawing a replacement");
                }
                self.glyph_id(ch)
            })
            .collect()
    }

    /// The width of `text` set at `size`
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let face = self.face();
        let units: u32 = text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| {
                face.glyph_hor_advance(GlyphId(self.glyph_id(ch)))
                    .unwrap_or_default() as u32
            })
            .sum();
        self.scaling(size) * units as f32
    }

    /// Every glyph reachable through a unicode cmap subtable, keyed by glyph id
    fn glyph_table(&self) -> BTreeMap<u16, GlyphEntry> {
        let face = self.face();
        let mut table = BTreeMap::new();

        let Some(cmap) = face.tables().cmap else {
            return table;
        };
        for subtable in cmap.subtables.into_iter().filter(|st| st.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) else {
                    return;
                };
                table.entry(gid.0).or_insert_with(|| GlyphEntry {
                    ch,
                    advance: face.glyph_hor_advance(gid).unwrap_or_default(),
                });
            });
        }

        table
    }

    /// The name the font is embedded under; PDF names must not contain spaces
    fn base_font(&self, font_index: usize) -> String {
        self.find_name(owned_ttf_parser::name_id::POST_SCRIPT_NAME)
            .map(|name| name.chars().filter(|ch| ch.is_ascii_graphic()).collect::<String>())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("F{font_index}"))
    }

    /// Embed the font as a Type0 font with a single CIDFontType2 descendant
    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let base_font = self.base_font(font_index);
        let glyphs = self.glyph_table();
        // pdf glyph space is 1000 units per em
        let to_pdf = 1000.0 / self.face().units_per_em() as f32;

        let font_id = refs.get_or_gen(RefType::Font(font_index));
        let cid_font_id = refs.gen(RefType::CidFont(font_index));
        let descriptor_id = self.write_descriptor(refs, font_index, &base_font, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(
            self.face()
                .glyph_hor_advance(GlyphId(0))
                .map(|w| w as f32 * to_pdf)
                .unwrap_or(1000.0),
        );

        // runs of consecutive glyph ids share one widths entry
        let mut widths = cid_font.widths();
        let mut run: Vec<f32> = Vec::new();
        let mut run_start = 0u16;
        for (&gid, entry) in glyphs.iter() {
            if !run.is_empty() && gid as usize != run_start as usize + run.len() {
                widths.consecutive(run_start, run.drain(..));
            }
            if run.is_empty() {
                run_start = gid;
            }
            run.push(entry.advance as f32 * to_pdf);
        }
        if !run.is_empty() {
            widths.consecutive(run_start, run);
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.finish();

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_font.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);

        log::debug!(
            "embedded font {base_font} as F{font_index} ({} mapped glyphs)",
            glyphs.len()
        );
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        base_font: &str,
        writer: &mut Pdf,
    ) -> Ref {
        let face = self.face();
        let to_pdf = 1000.0 / face.units_per_em() as f32;

        let data_id = refs.gen(RefType::FontData(font_index));
        let data = self.face.as_slice();
        let compressed = compress_to_vec_zlib(data, CompressionLevel::DefaultCompression as u8);
        writer
            .stream(data_id, &compressed)
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), data.len() as i32);

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let bbox = face.global_bounding_box();
        let weight = face.weight().to_number();
        let italic_angle = face
            .tables()
            .post
            .map(|post| post.italic_angle)
            .unwrap_or_default();

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(base_font.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(weight);
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * to_pdf,
            y1: bbox.y_min as f32 * to_pdf,
            x2: bbox.x_max as f32 * to_pdf,
            y2: bbox.y_max as f32 * to_pdf,
        });
        descriptor.italic_angle(italic_angle);
        descriptor.ascent(face.ascender() as f32 * to_pdf);
        descriptor.descent(face.descender() as f32 * to_pdf);
        descriptor.leading(face.line_gap() as f32 * to_pdf);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * to_pdf)
                .unwrap_or(face.ascender() as f32 * to_pdf),
        );
        // approximated from the weight class, fonts do not record it
        descriptor.stem_v(10.0 + 0.244 * (weight as f32 - 50.0));
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, GlyphEntry>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));
        let cmap = to_unicode_cmap(glyphs.iter().map(|(&gid, entry)| (gid, entry.ch)));
        let compressed = compress_to_vec_zlib(cmap.as_bytes(), CompressionLevel::DefaultCompression as u8);
        writer
            .stream(id, &compressed)
            .filter(Filter::FlateDecode);
        id
    }
}

impl GlyphMetrics for Font {
    fn width(&self, segment: &str, size: Pt) -> Result<Pt, MetricsError> {
        Ok(self.width_of_text(segment, size))
    }
}

/// Build a ToUnicode CMap program from `(glyph id, char)` pairs sorted by glyph id.
///
/// `bfchar` blocks hold at most 100 entries and never straddle a change in the glyph
/// id's high byte.
fn to_unicode_cmap<I>(pairs: I) -> String
where
    I: IntoIterator<Item = (u16, char)>,
{
    let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
    for (gid, ch) in pairs {
        let split = match blocks.last() {
            Some(block) => block.len() >= 100 || block[0].0 >> 8 != gid >> 8,
            None => true,
        };
        if split {
            blocks.push(Vec::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push((gid, ch));
        }
    }

    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    for block in blocks {
        let _ = writeln!(cmap, "{} beginbfchar", block.len());
        for (gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let _ = write!(cmap, "<{gid:04x}> <");
            for unit in ch.encode_utf16(&mut utf16) {
                let _ = write!(cmap, "{unit:04x}");
            }
            cmap.push_str(">\n");
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}
