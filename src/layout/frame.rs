use crate::font::Font;
use crate::rect::Rect;
use crate::units::Pt;
use crate::FlowError;

/// The region text is poured into on each page, together with the vertical metrics
/// of the text being poured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub bounds: Rect,
    /// Distance between consecutive baselines
    pub line_height: Pt,
    /// Height of the font above the baseline
    pub ascent: Pt,
    /// Depth of the font below the baseline, usually negative
    pub descent: Pt,
}

/// A line with its vertical position on a page. Lines start at the left edge of
/// the frame they were placed in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub baseline: Pt,
}

/// The result of [paginate]
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    /// Lines grouped by page, in reading order. The first group continues the page the
    /// layout started on and may be empty if the starting position was already too low.
    pub pages: Vec<Vec<PlacedLine>>,
    /// Where the line after the last placed one would go on the last page. This may lie
    /// below the frame, in which case the next line belongs on a fresh page.
    pub next_baseline: Pt,
}

impl Frame {
    /// A frame using the font's own ascent and descent, with its default line height
    /// multiplied by `spacing`
    pub fn for_font(bounds: Rect, font: &Font, size: Pt, spacing: f32) -> Frame {
        Frame {
            bounds,
            line_height: font.line_height(size) * spacing,
            ascent: font.ascent(size),
            descent: font.descent(size),
        }
    }

    /// The baseline of the first line on a fresh page, such that the tallest glyphs
    /// just touch the top of the frame
    pub fn first_baseline(&self) -> Pt {
        self.bounds.y2 - self.ascent
    }

    /// whether a line on this baseline stays above the bottom of the frame
    fn fits(&self, baseline: Pt) -> bool {
        baseline + self.descent >= self.bounds.y1
    }

    /// How many lines fit on a fresh page
    pub fn lines_per_page(&self) -> usize {
        if !self.line_height.is_positive() || !self.fits(self.first_baseline()) {
            return 0;
        }
        let spare = self.first_baseline() + self.descent - self.bounds.y1;
        (spare / self.line_height).floor() as usize + 1
    }
}

/// Place lines top to bottom, starting a new page whenever the next line would cross
/// the bottom of the frame. Blank lines take up space like any other line.
///
/// `start` is the baseline of the first line; it defaults to the frame's first
/// baseline. Pages after the first always start at the first baseline.
pub fn paginate<I>(lines: I, frame: &Frame, start: Option<Pt>) -> Result<Pagination, FlowError>
where
    I: IntoIterator<Item = String>,
{
    FlowError::check_positive("line_height", frame.line_height)?;
    if !frame.fits(frame.first_baseline()) {
        return Err(FlowError::FrameTooSmall {
            height: frame.bounds.height().0,
            line_height: frame.line_height.0,
        });
    }

    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = start.unwrap_or_else(|| frame.first_baseline());
    for text in lines {
        if !frame.fits(y) {
            pages.push(Vec::new());
            y = frame.first_baseline();
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine { text, baseline: y });
        }
        y -= frame.line_height;
    }

    log::debug!(
        "placed lines on {} page(s), {} per full page",
        pages.len(),
        frame.lines_per_page()
    );
    Ok(Pagination {
        pages,
        next_baseline: y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // 100pt tall frame, 20pt lines: baselines at 90, 70, 50, 30, 10
    fn frame() -> Frame {
        Frame {
            bounds: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: Pt(200.0),
                y2: Pt(100.0),
            },
            line_height: Pt(20.0),
            ascent: Pt(10.0),
            descent: Pt(-5.0),
        }
    }

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn fills_pages_top_down() {
        let frame = frame();
        assert_eq!(frame.lines_per_page(), 5);

        let result = paginate(lines(12), &frame, None).unwrap();
        let counts: Vec<usize> = result.pages.iter().map(Vec::len).collect();
        assert_eq!(counts, vec![5, 5, 2]);
        assert_eq!(result.pages[0][0].baseline, Pt(90.0));
        assert_eq!(result.pages[0][4].baseline, Pt(10.0));
        assert_eq!(result.pages[1][0].text, "line 5");
        assert_eq!(result.pages[1][0].baseline, Pt(90.0));
        assert_eq!(result.next_baseline, Pt(50.0));
    }

    #[test]
    fn blank_lines_take_space() {
        let text = vec!["a".to_string(), String::new(), "b".to_string()];
        let result = paginate(text, &frame(), None).unwrap();
        assert_eq!(result.pages[0][2].baseline, Pt(50.0));
    }

    #[test]
    fn continues_from_a_starting_baseline() {
        let result = paginate(lines(3), &frame(), Some(Pt(30.0))).unwrap();
        let counts: Vec<usize> = result.pages.iter().map(Vec::len).collect();
        assert_eq!(counts, vec![2, 1]);

        // too low for even one line: the current page receives nothing
        let result = paginate(lines(1), &frame(), Some(Pt(2.0))).unwrap();
        assert!(result.pages[0].is_empty());
        assert_eq!(result.pages[1][0].baseline, Pt(90.0));
    }

    #[test]
    fn rejects_frames_that_cannot_make_progress() {
        let mut tiny = frame();
        tiny.bounds.y2 = Pt(12.0);
        assert!(matches!(
            paginate(lines(1), &tiny, None),
            Err(FlowError::FrameTooSmall { .. })
        ));

        let mut flat = frame();
        flat.line_height = Pt(0.0);
        assert!(matches!(
            paginate(lines(1), &flat, None),
            Err(FlowError::InvalidArgument {
                name: "line_height",
                ..
            })
        ));
    }
}
