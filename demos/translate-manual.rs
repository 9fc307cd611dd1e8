//! Lay out an already-translated manual as a PDF.
//!
//! ```text
//! cargo run --example translate-manual -- <font.ttf> <translated.txt> <out.pdf> [lang]
//! ```

use pdf_flow::layout::{Margins, PageSetup};
use pdf_flow::{pagesize, Document, Font, In, Info, Pt};
use std::error::Error;
use std::io::Write;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [font_path, text_path, out_path, rest @ ..] = args.as_slice() else {
        eprintln!("usage: translate-manual <font.ttf> <translated.txt> <out.pdf> [lang]");
        std::process::exit(2);
    };

    let font = Font::load(std::fs::read(font_path)?)?;
    let text = std::fs::read_to_string(text_path)?;

    let mut doc = Document::new();
    let mut info = Info::new();
    info.title(text.lines().next().unwrap_or("Manual"))
        .subject("Translated manual");
    if let Some(lang) = rest.first() {
        info.language(lang);
    }
    doc.set_info(info);

    let font = doc.add_font(font);
    let setup = PageSetup::new()
        .size(pagesize::A4)
        .margins(Margins::symmetric(In(0.8), In(0.7)))
        .gutter(In(0.25))
        .font_size(Pt(10.5))
        .line_spacing(1.3);
    let pages = doc.flow_text(font, &text, &setup)?;
    println!("laid out {} page(s)", pages.len());

    let mut out = std::io::BufWriter::new(std::fs::File::create(out_path)?);
    doc.write(&mut out)?;
    out.flush()?;
    Ok(())
}
