//! Property-based invariant tests for the line wrapper.
//!
//! 1. A paragraph that fits comes back as exactly one whitespace-normalized line.
//! 2. Forced breaks are preserved: every paragraph wraps on its own.
//! 3. Lines rejoined with single spaces reconstruct each normalized paragraph.
//! 4. Re-wrapping any produced line returns it unchanged.
//! 5. No line is wider than the limit unless it is a single oversized token.
//! 6. Unspaced CJK text wraps per character and loses nothing.
//! 7. Properties 4 and 5 also hold for mixed kana/Latin text under every break policy.

use pdf_flow::flow::{self, paragraphs, tokenize, BreakPolicy, TextFlow};
use pdf_flow::Pt;
use proptest::prelude::*;

fn ten_per_char(s: &str, _size: Pt) -> Pt {
    Pt(s.chars().count() as f32 * 10.0)
}

// ── Strategies ────────────────────────────────────────────────────────────

fn separator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![" ", "  ", "\t", " \t "])
}

/// (raw paragraph text with messy whitespace, its words)
fn paragraph() -> impl Strategy<Value = (String, Vec<String>)> {
    prop::collection::vec(("[a-z]{1,12}", separator()), 0..12).prop_map(|parts| {
        let mut raw = String::new();
        let mut words = Vec::new();
        for (word, sep) in parts {
            raw.push_str(&word);
            raw.push_str(sep);
            words.push(word);
        }
        (raw, words)
    })
}

fn document() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::vec(paragraph(), 1..6)
}

/// Full-width characters take twice the room of ASCII
fn by_script(s: &str, _size: Pt) -> Pt {
    Pt(s.chars().map(|c| if c.is_ascii() { 10.0 } else { 20.0 }).sum())
}

fn any_policy() -> impl Strategy<Value = BreakPolicy> {
    prop::sample::select(vec![
        BreakPolicy::Whitespace,
        BreakPolicy::Auto,
        BreakPolicy::Character,
    ])
}

/// Japanese-style text: kana runs, Latin words, ideographic commas and the odd space
fn mixed_script() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        3 => prop::collection::vec(prop::char::range('\u{3041}', '\u{3093}'), 1..6)
            .prop_map(|kana| kana.into_iter().collect::<String>()),
        2 => prop::collection::vec(prop::char::range('\u{30a1}', '\u{30f3}'), 1..6)
            .prop_map(|kana| kana.into_iter().collect::<String>()),
        2 => "[A-Za-z]{1,8}",
        1 => Just("、".to_string()),
        1 => Just(" ".to_string()),
    ];
    prop::collection::vec(piece, 1..16).prop_map(|pieces| pieces.concat())
}

fn mixed_document() -> impl Strategy<Value = String> {
    prop::collection::vec(mixed_script(), 1..4).prop_map(|paragraphs| paragraphs.join("\n"))
}

fn max_width() -> impl Strategy<Value = Pt> {
    (1u32..=30).prop_map(|chars| Pt(chars as f32 * 10.0))
}

proptest! {
    #[test]
    fn fitting_paragraph_is_one_line((raw, words) in paragraph()) {
        prop_assume!(!words.is_empty());
        let lines = flow::wrap(&raw, &ten_per_char, Pt(10.0), Pt(100_000.0)).unwrap();
        prop_assert_eq!(lines, vec![words.join(" ")]);
    }

    #[test]
    fn paragraphs_are_preserved(doc in document(), width in max_width()) {
        let text = doc.iter().map(|(raw, _)| raw.as_str()).collect::<Vec<_>>().join("\n");
        let flow = TextFlow::new(Pt(10.0), width);
        let whole = flow.wrap(&text, &ten_per_char).unwrap();

        let mut rebuilt = Vec::new();
        let mut groups = 0;
        for piece in paragraphs(&text) {
            let lines = flow.wrap_paragraph(piece, &ten_per_char).unwrap();
            prop_assert!(!lines.is_empty());
            rebuilt.extend(lines);
            groups += 1;
        }
        prop_assert_eq!(groups, doc.len());
        prop_assert_eq!(whole, rebuilt);
    }

    #[test]
    fn lines_reconstruct_the_paragraph((raw, words) in paragraph(), width in max_width()) {
        let lines = TextFlow::new(Pt(10.0), width)
            .wrap_paragraph(&raw, &ten_per_char)
            .unwrap();
        if words.is_empty() {
            prop_assert_eq!(lines, vec![String::new()]);
        } else {
            prop_assert!(lines.iter().all(|l| !l.is_empty()));
            prop_assert_eq!(lines.join(" "), words.join(" "));
        }
    }

    #[test]
    fn rewrapping_is_idempotent(doc in document(), width in max_width()) {
        let text = doc.iter().map(|(raw, _)| raw.as_str()).collect::<Vec<_>>().join("\n");
        let flow = TextFlow::new(Pt(10.0), width);
        for line in flow.wrap(&text, &ten_per_char).unwrap() {
            let again = flow.wrap_paragraph(&line, &ten_per_char).unwrap();
            prop_assert_eq!(again, vec![line]);
        }
    }

    #[test]
    fn lines_respect_the_width((raw, _words) in paragraph(), width in max_width()) {
        let lines = TextFlow::new(Pt(10.0), width)
            .wrap_paragraph(&raw, &ten_per_char)
            .unwrap();
        for line in lines {
            let single_token = !line.contains(' ');
            prop_assert!(ten_per_char(&line, Pt(10.0)) <= width || single_token, "{:?}", line);
        }
    }

    #[test]
    fn dense_text_wraps_per_character(
        chars in prop::collection::vec(prop::char::range('\u{4e00}', '\u{4e50}'), 1..40),
        per_line in 1usize..=8,
    ) {
        let text: String = chars.iter().collect();
        let width = Pt(per_line as f32 * 10.0);
        let lines = flow::wrap(&text, &ten_per_char, Pt(10.0), width).unwrap();

        prop_assert_eq!(lines.len(), chars.len().div_ceil(per_line));
        prop_assert!(lines.iter().all(|l| l.chars().count() <= per_line));
        prop_assert_eq!(lines.concat(), text);
    }

    #[test]
    fn mixed_script_rewrapping_is_idempotent(
        text in mixed_document(),
        width in max_width(),
        policy in any_policy(),
    ) {
        let flow = TextFlow::new(Pt(10.0), width).policy(policy);
        for line in flow.wrap(&text, &by_script).unwrap() {
            let again = flow.wrap_paragraph(&line, &by_script).unwrap();
            prop_assert_eq!(again, vec![line]);
        }
    }

    #[test]
    fn mixed_script_lines_respect_the_width(
        text in mixed_script(),
        width in max_width(),
        policy in any_policy(),
    ) {
        let lines = TextFlow::new(Pt(10.0), width)
            .policy(policy)
            .wrap_paragraph(&text, &by_script)
            .unwrap();
        prop_assert!(!lines.is_empty());
        for line in lines {
            let single_token = tokenize(&line, policy).len() <= 1;
            prop_assert!(
                by_script(&line, Pt(10.0)) <= width || single_token,
                "{:?} under {:?}",
                line,
                policy
            );
        }
    }
}
