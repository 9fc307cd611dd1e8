use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Decides which pieces of a paragraph are atomic, i.e. which pieces the wrapper is
/// allowed to put on different lines
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BreakPolicy {
    /// Break only at whitespace. A run of text without whitespace stays on one line
    /// even when it is wider than the line, so unspaced scripts (Japanese, Chinese)
    /// never wrap.
    Whitespace,
    /// Break at whitespace, and around every East Asian wide character. Latin words
    /// embedded in CJK text are still kept whole.
    #[default]
    Auto,
    /// Break between any two grapheme clusters
    Character,
}

/// An atomic piece of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Whitespace preceded this token in the source, so a single space separates it
    /// from the previous token when both land on the same line
    pub spaced: bool,
}

/// Split a single paragraph (no forced breaks) into atomic tokens according to the
/// policy. Whitespace never appears inside a token; a whitespace-only paragraph has
/// no tokens at all.
pub fn tokenize(paragraph: &str, policy: BreakPolicy) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for (wi, word) in paragraph.split_whitespace().enumerate() {
        let spaced = wi > 0;
        match policy {
            BreakPolicy::Whitespace => tokens.push(Token { text: word, spaced }),
            BreakPolicy::Character => {
                for (gi, grapheme) in word.graphemes(true).enumerate() {
                    tokens.push(Token {
                        text: grapheme,
                        spaced: spaced && gi == 0,
                    });
                }
            }
            BreakPolicy::Auto => split_dense(word, spaced, &mut tokens),
        }
    }
    tokens
}

fn is_dense(grapheme: &str) -> bool {
    grapheme.width() >= 2
}

/// emit each wide grapheme on its own, keep runs of narrow graphemes together
fn split_dense<'a>(word: &'a str, mut spaced: bool, tokens: &mut Vec<Token<'a>>) {
    let mut run_start: Option<usize> = None;
    for (idx, grapheme) in word.grapheme_indices(true) {
        if !is_dense(grapheme) {
            run_start.get_or_insert(idx);
            continue;
        }

        if let Some(start) = run_start.take() {
            tokens.push(Token {
                text: &word[start..idx],
                spaced,
            });
            spaced = false;
        }
        tokens.push(Token {
            text: grapheme,
            spaced,
        });
        spaced = false;
    }

    if let Some(start) = run_start {
        tokens.push(Token {
            text: &word[start..],
            spaced,
        });
    }
}
