use crate::markdown::{self, normalize_title, TokenKind};

/// A level-2 or level-3 heading and the text up to the next such heading.
///
/// Spans never nest: a `###` span following a `##` span is a sibling in the
/// byte stream and only becomes a subsection by virtue of its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SectionSpan<'a> {
    pub level: usize,
    pub title: &'a str,
    pub normalized: String,
    pub body: String,
}

/// Split `text` into heading/body spans. Text before the first heading is dropped.
pub(crate) fn split_sections(text: &str) -> Vec<SectionSpan<'_>> {
    let mut spans: Vec<SectionSpan<'_>> = Vec::new();
    for token in markdown::tokenize(text) {
        match token.kind {
            TokenKind::Heading { level, text } if (2..=3).contains(&level) => {
                spans.push(SectionSpan {
                    level,
                    title: text,
                    normalized: normalize_title(text),
                    body: String::new(),
                });
            }
            _ => {
                if let Some(current) = spans.last_mut() {
                    current.body.push_str(token.line);
                    current.body.push('\n');
                }
            }
        }
    }
    spans
}
