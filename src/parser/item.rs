use std::sync::LazyLock;

use regex::Regex;

static REQ_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`\[req:([^\]`]*)\]`").unwrap());

static NOTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_\((.*)\)_\s*$").unwrap());

/// The text of a checklist item with its annotations pulled out.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ItemText {
    pub body: String,
    pub notes: Option<String>,
    pub requirement_ids: Vec<String>,
}

/// Strip `` `[req:...]` `` tags and a trailing `_(notes)_` from an item line.
pub(crate) fn split_item(text: &str) -> ItemText {
    let mut requirement_ids: Vec<String> = Vec::new();
    for caps in REQ_TAG_RE.captures_iter(text) {
        let Some(list) = caps.get(1) else { continue };
        for id in list.as_str().split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !requirement_ids.iter().any(|existing| existing == id) {
                requirement_ids.push(id.to_string());
            }
        }
    }

    let without_tags = REQ_TAG_RE.replace_all(text, "");
    let without_tags = without_tags.trim();

    let (body, notes) = match NOTES_RE.captures(without_tags) {
        Some(caps) => {
            let start = caps.get(0).map_or(without_tags.len(), |m| m.start());
            let notes = caps.get(1).map(|m| m.as_str().trim().to_string());
            (without_tags[..start].trim().to_string(), notes)
        }
        None => (without_tags.to_string(), None),
    };

    ItemText {
        body,
        notes: notes.filter(|n| !n.is_empty()),
        requirement_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_item_has_no_annotations() {
        let item = split_item("Visual workflow builder");
        assert_eq!(item.body, "Visual workflow builder");
        assert!(item.notes.is_none());
        assert!(item.requirement_ids.is_empty());
    }

    #[test]
    fn pulls_notes_and_tags() {
        let item = split_item("Login _(SSO later)_ `[req:REQ-1, REQ-2,REQ-1]`");
        assert_eq!(item.body, "Login");
        assert_eq!(item.notes.as_deref(), Some("SSO later"));
        assert_eq!(item.requirement_ids, vec!["REQ-1", "REQ-2"]);
    }

    #[test]
    fn empty_tag_links_nothing() {
        let item = split_item("Login `[req:]`");
        assert_eq!(item.body, "Login");
        assert!(item.requirement_ids.is_empty());
    }
}
