use anyhow::{ensure, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{atf::document::SurfaceLabel, utility::parse_number};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum AtfLine {
    TabletId {
        id: String,
        designation: Option<String>,
    },
    StateDirective {
        directive: String,
    },
    SurfaceMarker {
        label: SurfaceLabel,
    },
    ColumnMarker {
        number: usize,
    },
    LanguageShift {
        lang: String,
    },
    Translation {
        lang: String,
        text: String,
    },
    CompositeRef {
        text: String,
    },
    ContentLine {
        label: String,
        is_prime: bool,
        text: String,
    },
    Unclassified {
        text: String,
    },
}

// 字句解析: one classified record per raw line, keyed on the line-initial
// sentinel. Classification never halts the pass; a line that fits no sentinel
// is carried through opaquely.
pub fn classify_atf(txt: &str) -> Result<Vec<AtfLine>> {
    ensure!(!txt.contains('\0'), "Input is not text");
    ensure!(!txt.trim().is_empty(), "Cannot classify empty input");

    let mut lines = Vec::new();
    for raw in txt.lines() {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        lines.push(classify_line(raw));
    }

    Ok(lines)
}

fn classify_line(line: &str) -> AtfLine {
    static REGEX_TABLET_ID: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^&(?P<id>\S+)\s*(?:=\s*(?P<designation>.+))?$").unwrap());
    if let Some(caps) = REGEX_TABLET_ID.captures(line) {
        return AtfLine::TabletId {
            id: caps.name("id").unwrap().as_str().to_owned(),
            designation: caps
                .name("designation")
                .map(|m| m.as_str().trim().to_owned()),
        };
    }

    static REGEX_STATE_DIRECTIVE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^#atf:\s*(?P<directive>.*)$").unwrap());
    if let Some(caps) = REGEX_STATE_DIRECTIVE.captures(line) {
        return AtfLine::StateDirective {
            directive: caps.name("directive").unwrap().as_str().trim().to_owned(),
        };
    }

    static REGEX_TRANSLATION: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^#tr\.(?P<lang>[A-Za-z][A-Za-z0-9-]*)\s*:\s*(?P<text>.*)$").unwrap()
    });
    if let Some(caps) = REGEX_TRANSLATION.captures(line) {
        return AtfLine::Translation {
            lang: caps.name("lang").unwrap().as_str().to_owned(),
            text: caps.name("text").unwrap().as_str().to_owned(),
        };
    }

    if let Some(text) = line.strip_prefix(">>") {
        return AtfLine::CompositeRef {
            text: text.trim().to_owned(),
        };
    }

    // "@column 2" and the bare "@2" shorthand
    static REGEX_COLUMN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^@(?:column\s+)?(?P<number>[0-9]+)$").unwrap());
    if let Some(caps) = REGEX_COLUMN.captures(line) {
        // an absurdly long numeral overflows; the line stays opaque then
        if let Ok(number) = parse_number(caps.name("number").unwrap().as_str()) {
            return AtfLine::ColumnMarker { number };
        }
    }

    static REGEX_SURFACE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^@(?P<name>[a-z][a-z ]*)$").unwrap());
    if let Some(caps) = REGEX_SURFACE.captures(line) {
        let name = caps.name("name").unwrap().as_str().trim();
        // a bare "@column" without a numeral is not a surface
        if name != "column" {
            return AtfLine::SurfaceMarker {
                label: SurfaceLabel::of(name),
            };
        }
    }

    static REGEX_LANGUAGE_SHIFT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^%(?P<lang>[a-z][a-z0-9/-]*)$").unwrap());
    if let Some(caps) = REGEX_LANGUAGE_SHIFT.captures(line) {
        return AtfLine::LanguageShift {
            lang: caps.name("lang").unwrap().as_str().to_owned(),
        };
    }

    // "1.", "2'.", "3a." (primes and letter suffixes are part of the label)
    static REGEX_CONTENT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<label>[0-9]+[A-Za-z]?['′]*)\.(?:\s+(?P<text>.*))?$").unwrap()
    });
    if let Some(caps) = REGEX_CONTENT.captures(line) {
        let label = caps.name("label").unwrap().as_str().to_owned();
        let is_prime = label.contains(['\'', '′']);
        return AtfLine::ContentLine {
            label,
            is_prime,
            text: caps.name("text").map_or(String::new(), |m| m.as_str().to_owned()),
        };
    }

    AtfLine::Unclassified {
        text: line.to_owned(),
    }
}
