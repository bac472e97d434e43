//! Line-level markdown tokenizer shared by the parser, serializer and validator.
//!
//! Only the narrow subset PRDs rely on is recognized: ATX headings, bold
//! category bullets and checklist items. Everything else is a plain line.
//! The legacy and modern target grammars are both expressed over this token
//! stream.

mod normalize;

pub use normalize::{normalize_key, normalize_title};

use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").unwrap());

static CHECKLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+\[([^\]]?)\]\s*(.*?)\s*$").unwrap());

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+\*\*(.+?)\*\*\s*:?\s*$").unwrap());

static CATEGORY_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\(([^()]*)\)\s*$").unwrap());

/// What a single line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Heading { level: usize, text: &'a str },
    /// `- **Must Have (P0)**`; the label is everything between the asterisks.
    CategoryHeader { label: &'a str },
    ChecklistItem { checked: bool, text: &'a str },
    Plain,
}

/// One line of the document with its byte span (newline included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub line: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    pub fn heading_level(&self) -> Option<usize> {
        match self.kind {
            TokenKind::Heading { level, .. } => Some(level),
            _ => None,
        }
    }
}

/// Split `text` into one token per line.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for raw in text.split_inclusive('\n') {
        let start = offset;
        offset += raw.len();
        let line = raw.trim_end_matches(['\n', '\r']);
        tokens.push(Token {
            kind: classify(line),
            line,
            start,
            end: offset,
        });
    }
    tokens
}

fn classify(line: &str) -> TokenKind<'_> {
    if let Some(caps) = HEADING_RE.captures(line) {
        let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2)) else {
            return TokenKind::Plain;
        };
        return TokenKind::Heading {
            level: hashes.as_str().len(),
            text: text.as_str(),
        };
    }
    if let Some(caps) = CHECKLIST_RE.captures(line) {
        let mark = caps.get(1).map_or("", |m| m.as_str());
        return TokenKind::ChecklistItem {
            checked: mark.eq_ignore_ascii_case("x"),
            text: caps.get(2).map_or("", |m| m.as_str()),
        };
    }
    if let Some(caps) = CATEGORY_RE.captures(line) {
        if let Some(label) = caps.get(1) {
            return TokenKind::CategoryHeader {
                label: label.as_str(),
            };
        }
    }
    TokenKind::Plain
}

/// Split `Must Have (P0)` into `("Must Have", "P0")`.
///
/// A label with no parenthetical suffix yields an empty criticality.
pub fn split_category_label(label: &str) -> (String, String) {
    match CATEGORY_SUFFIX_RE.captures(label) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
            caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
        ),
        None => (label.trim().to_string(), String::new()),
    }
}

/// Byte offset where the section opened by `tokens[heading_idx]` ends: the
/// start of the next heading at the same or a higher level, or the end of
/// the document.
pub fn section_end(tokens: &[Token<'_>], heading_idx: usize, text_len: usize) -> usize {
    let Some(level) = tokens.get(heading_idx).and_then(Token::heading_level) else {
        return text_len;
    };
    tokens[heading_idx + 1..]
        .iter()
        .find(|t| t.heading_level().is_some_and(|l| l <= level))
        .map_or(text_len, |t| t.start)
}

/// Index of the first heading whose normalized text, ignoring trailing
/// punctuation, equals `title`.
pub fn find_heading(tokens: &[Token<'_>], title: &str, levels: &[usize]) -> Option<usize> {
    tokens.iter().position(|t| match t.kind {
        TokenKind::Heading { level, text } => {
            levels.contains(&level)
                && normalize_title(text)
                    .trim_end_matches(|c: char| c.is_ascii_punctuation())
                    .trim_end()
                    == title
        }
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_heading_ignores_trailing_punctuation() {
        let tokens = tokenize("# Demo\n## Operational Targets:\n");
        assert_eq!(find_heading(&tokens, "operational targets", &[2, 3]), Some(1));
        assert_eq!(find_heading(&tokens, "operational", &[2, 3]), None);
    }

    #[test]
    fn classifies_each_line_kind() {
        let text = "## 🎯 Overview\n- **Must Have (P0)**\n  - [X] Ship it\nplain text\n";
        let kinds: Vec<_> = tokenize(text).into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Heading {
                    level: 2,
                    text: "🎯 Overview"
                },
                TokenKind::CategoryHeader {
                    label: "Must Have (P0)"
                },
                TokenKind::ChecklistItem {
                    checked: true,
                    text: "Ship it"
                },
                TokenKind::Plain,
            ]
        );
    }

    #[test]
    fn byte_spans_cover_the_document() {
        let text = "# A\r\nline\nlast";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].line, "# A");
        assert_eq!(tokens[1].start, 5);
        assert_eq!(tokens[2].end, text.len());
    }

    #[test]
    fn hashes_without_space_are_not_headings() {
        assert_eq!(tokenize("#hashtag")[0].kind, TokenKind::Plain);
    }

    #[test]
    fn empty_checkbox_is_pending() {
        let tokens = tokenize("- [] nothing yet");
        assert_eq!(
            tokens[0].kind,
            TokenKind::ChecklistItem {
                checked: false,
                text: "nothing yet"
            }
        );
    }

    #[test]
    fn splits_category_suffix() {
        assert_eq!(
            split_category_label("Must Have (P0)"),
            ("Must Have".to_string(), "P0".to_string())
        );
        assert_eq!(
            split_category_label("Nice to Have"),
            ("Nice to Have".to_string(), String::new())
        );
    }

    #[test]
    fn section_end_stops_at_same_or_higher_level() {
        let text = "### Functional Requirements\n#### Detail\n- x\n## Next\n";
        let tokens = tokenize(text);
        let end = section_end(&tokens, 0, text.len());
        assert_eq!(&text[end..], "## Next\n");
    }
}
