use once_cell::sync::Lazy;
use regex::Regex;

use crate::atf::document::{CompositeReference, Line};

// Translation and composite-reference lines annotate the content line that
// precedes them; with nothing to bind to they are dropped silently.

pub(super) fn bind_translation(line: Option<&mut Line>, lang: &str, text: &str) {
    let translations = match line {
        Some(Line::Content { translations, .. }) => translations,
        _ => return,
    };

    // languages accumulate; a repeated language overwrites (last write wins)
    translations.insert(lang.to_owned(), text.trim().to_owned());
}

pub(super) fn bind_composite(line: Option<&mut Line>, text: &str) {
    let composite = match line {
        Some(Line::Content { composite, .. }) => composite,
        _ => return,
    };

    if let Some(reference) = parse_composite_reference(text) {
        // at most one reference per line
        *composite = Some(reference);
    }
}

// ">>Q000001 56" -> target "Q000001", line label "56"
pub(super) fn parse_composite_reference(text: &str) -> Option<CompositeReference> {
    static REGEX_COMPOSITE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<target>\S+)(?:\s+(?P<label>\S.*))?$").unwrap());

    let caps = REGEX_COMPOSITE.captures(text.trim())?;
    Some(CompositeReference {
        target: caps.name("target").unwrap().as_str().to_owned(),
        line_label: caps.name("label").map(|m| m.as_str().trim().to_owned()),
    })
}
