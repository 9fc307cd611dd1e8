use super::token::{tokenize, BreakPolicy};
use crate::metrics::{measure, GlyphMetrics};
use crate::{FlowError, Pt};
use std::borrow::Cow;

/// Replace `\r\n` and lone `\r` with `\n`
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Split text at forced breaks. Empty segments are kept, so `"a\n\nb"` yields three
/// paragraphs and `""` yields one empty paragraph. Expects newlines to already be
/// normalized.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
}

/// Greedy line wrapper for a single font size and line width.
///
/// The flow is a plain value: it can be copied freely and shared across threads, and
/// wrapping never mutates it.
///
/// # Example
///
/// ```
/// use pdf_flow::{flow::TextFlow, Pt};
///
/// let width = |s: &str, _size: Pt| Pt(s.chars().count() as f32 * 10.0);
/// let lines = TextFlow::new(Pt(10.0), Pt(100.0))
///     .wrap("the quick brown fox\n\njumps", &width)
///     .unwrap();
/// assert_eq!(lines, vec!["the quick", "brown fox", "", "jumps"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFlow {
    /// Font size handed to the metrics provider
    pub size: Pt,
    /// No line may be wider than this unless it holds a single oversized token
    pub max_width: Pt,
    pub policy: BreakPolicy,
}

impl TextFlow {
    pub fn new(size: Pt, max_width: Pt) -> TextFlow {
        TextFlow {
            size,
            max_width,
            policy: BreakPolicy::default(),
        }
    }

    /// Set how paragraphs are split into atomic tokens
    pub fn policy(mut self, policy: BreakPolicy) -> TextFlow {
        self.policy = policy;
        self
    }

    fn validate(&self) -> Result<(), FlowError> {
        FlowError::check_positive("size", self.size)?;
        FlowError::check_positive("max_width", self.max_width)
    }

    /// Wrap a block of text into lines. Every forced break in `text` starts a new line;
    /// blank paragraphs become empty lines. Empty text produces a single empty line.
    pub fn wrap<M>(&self, text: &str, metrics: &M) -> Result<Vec<String>, FlowError>
    where
        M: GlyphMetrics + ?Sized,
    {
        self.validate()?;

        let text = normalize_newlines(text);
        let mut lines = Vec::new();
        let mut count = 0usize;
        for paragraph in paragraphs(&text) {
            self.wrap_into(paragraph, metrics, &mut lines)?;
            count += 1;
        }

        log::debug!(
            "wrapped {count} paragraph(s) into {} line(s), max width {}",
            lines.len(),
            self.max_width
        );
        Ok(lines)
    }

    /// Wrap one paragraph. Any line breaks inside `paragraph` are treated as ordinary
    /// whitespace; split text with [paragraphs] first to honour them. Paragraphs are
    /// independent of each other, so callers may wrap them in parallel and
    /// concatenate the results in paragraph order.
    pub fn wrap_paragraph<M>(&self, paragraph: &str, metrics: &M) -> Result<Vec<String>, FlowError>
    where
        M: GlyphMetrics + ?Sized,
    {
        self.validate()?;
        let mut lines = Vec::new();
        self.wrap_into(paragraph, metrics, &mut lines)?;
        Ok(lines)
    }

    fn wrap_into<M>(
        &self,
        paragraph: &str,
        metrics: &M,
        lines: &mut Vec<String>,
    ) -> Result<(), FlowError>
    where
        M: GlyphMetrics + ?Sized,
    {
        let tokens = tokenize(paragraph, self.policy);
        if tokens.is_empty() {
            lines.push(String::new());
            return Ok(());
        }

        let mut line = String::new();
        for token in tokens {
            let mark = line.len();
            if !line.is_empty() && token.spaced {
                line.push(' ');
            }
            line.push_str(token.text);

            let width = measure(metrics, &line, self.size)?;
            if width <= self.max_width {
                continue;
            }

            line.truncate(mark);
            if line.is_empty() {
                // nothing to fall back to: the token gets a line of its own
                log::warn!(
                    "{:?} is wider than the line ({} > {}), leaving it unbroken",
                    token.text,
                    width,
                    self.max_width
                );
                lines.push(token.text.to_string());
            } else {
                log::trace!("breaking before {:?} at width {}", token.text, width);
                lines.push(std::mem::take(&mut line));
                line.push_str(token.text);
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
        Ok(())
    }
}

/// Wrap `text` into lines no wider than `max_width` using the default [BreakPolicy].
///
/// See [TextFlow::wrap].
pub fn wrap<M>(text: &str, metrics: &M, size: Pt, max_width: Pt) -> Result<Vec<String>, FlowError>
where
    M: GlyphMetrics + ?Sized,
{
    TextFlow::new(size, max_width).wrap(text, metrics)
}
