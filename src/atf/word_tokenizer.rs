use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    atf::{
        determinative,
        document::{AttachmentPosition, DamageFlags, Token},
        language::TokenizationMode,
    },
    utility::{has_alphanumeric, is_all_caps},
};

// 語彙解析: lexical split of one content line.
// Never fails: lexical anomalies stay visible as opaque tokens instead.
pub fn tokenize_content(text: &str, baseline: TokenizationMode) -> Vec<Token> {
    let mut tokens = Vec::new();

    // the baseline mode is restored at every line start; inline shifts
    // override it only until the next shift or the end of the line
    let mut mode = baseline;

    for chunk in split_chunks(text) {
        static REGEX_LANGUAGE_SHIFT: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^%(?P<lang>[a-z][a-z0-9/-]*)$").unwrap());
        if let Some(caps) = REGEX_LANGUAGE_SHIFT.captures(&chunk) {
            mode = TokenizationMode::for_language(caps.name("lang").unwrap().as_str());
            continue;
        }

        // a complete bracketed run is one broken span
        if chunk.len() >= 2 && chunk.starts_with('[') && chunk.ends_with(']') {
            tokens.push(Token::Broken {
                display_text: chunk,
                damage: DamageFlags::default(),
            });
            continue;
        }

        parse_chunk(&chunk, mode, &mut tokens);
    }

    tokens
}

// Whitespace split, except that a chunk-initial '[' glues everything up to
// the matching ']' into a single chunk. An unterminated '[' is left in place;
// it degrades to damage on its word further down.
fn split_chunks(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        if chars[i] == '[' {
            if let Some(len) = chars[i..].iter().position(|&c| c == ']') {
                chunks.push(chars[i..=(i + len)].iter().collect());
                i += len + 1;
                continue;
            }
        }

        let start = i;
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
        chunks.push(chars[start..i].iter().collect());
    }

    chunks
}

enum Segment {
    Det(String),
    Text(String),
}

// '{code}' groups split out of a chunk; an unterminated '{' stays literal
fn split_segments(chunk: &str) -> Vec<Segment> {
    let chars: Vec<char> = chunk.chars().collect();
    let mut segments = Vec::new();
    let mut buf = String::new();

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '{' {
            if let Some(len) = chars[(i + 1)..].iter().position(|&c| c == '}') {
                if !buf.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut buf)));
                }
                segments.push(Segment::Det(chars[(i + 1)..(i + 1 + len)].iter().collect()));
                i += len + 2;
                continue;
            }
        }

        buf.push(chars[i]);
        i += 1;
    }
    if !buf.is_empty() {
        segments.push(Segment::Text(buf));
    }

    segments
}

enum Plan {
    Word(String),
    Logogram(String),
    Punctuation(String),
    Det(String),
    Skip,
}

fn parse_chunk(raw: &str, mode: TokenizationMode, tokens: &mut Vec<Token>) {
    let mut flags = DamageFlags::default();
    let mut chunk = raw.to_owned();

    // a stray bracket is damage on this word, not an unterminated-bracket failure
    if chunk.contains('[') || chunk.contains(']') {
        chunk.retain(|c| c != '[' && c != ']');
        flags.damaged = true;
    }

    // trailing run of damage / uncertainty / correction marks, combinable
    loop {
        match chunk.chars().last() {
            Some('#') => flags.damaged = true,
            Some('?') => flags.uncertain = true,
            Some('!') => flags.corrected = true,
            _ => break,
        }
        chunk.pop();
    }

    if chunk.is_empty() {
        // a bare marker run describes whatever came right before it,
        // typically a glued bracket span like "[x x x]#"
        if flags.any() {
            apply_trailing_flags(tokens, flags);
        }
        return;
    }

    let segments = split_segments(&chunk);
    let n = segments.len();

    // one token per segment; a bare '-' left over next to a determinative
    // is a separator, not a word
    let mut plans = Vec::with_capacity(n);
    for i in 0..n {
        let plan = match &segments[i] {
            Segment::Det(code) => Plan::Det(code.clone()),
            Segment::Text(value) => {
                let mut value = value.as_str();
                if i > 0 && matches!(segments[i - 1], Segment::Det(_)) {
                    value = value.strip_prefix('-').unwrap_or(value);
                }
                if matches!(segments.get(i + 1), Some(Segment::Det(_))) {
                    value = value.strip_suffix('-').unwrap_or(value);
                }

                if value.is_empty() {
                    Plan::Skip
                } else if !has_alphanumeric(value) {
                    Plan::Punctuation(value.to_owned())
                } else if is_all_caps(value) {
                    Plan::Logogram(value.to_owned())
                } else {
                    Plan::Word(value.to_owned())
                }
            }
        };
        plans.push(plan);
    }

    // final token index each segment will occupy
    let mut indices = Vec::with_capacity(n);
    let mut next = tokens.len();
    for plan in &plans {
        if matches!(plan, Plan::Skip) {
            indices.push(None);
        } else {
            indices.push(Some(next));
            next += 1;
        }
    }

    let base = tokens.len();
    let is_companion = |i: usize| matches!(plans.get(i), Some(Plan::Word(_) | Plan::Logogram(_)));

    for i in 0..n {
        match &plans[i] {
            Plan::Skip => {}

            Plan::Punctuation(value) => tokens.push(Token::Punctuation {
                display_text: value.clone(),
            }),

            Plan::Word(value) => tokens.push(Token::Word {
                lookup_key: lookup_key_for(value, mode),
                display_text: value.clone(),
                damage: DamageFlags::default(),
            }),

            Plan::Logogram(value) => tokens.push(Token::Logogram {
                lookup_key: lookup_key_for(value, mode),
                display_text: value.clone(),
                damage: DamageFlags::default(),
            }),

            Plan::Det(code) => {
                let spec = determinative::resolve(code);

                // source position wins over the table default: a following word
                // makes a prefix, unless a '-' ties the marker to the word before
                let binds_forward = match segments.get(i + 1) {
                    Some(Segment::Text(next_raw)) => {
                        is_companion(i + 1) && !next_raw.starts_with('-')
                    }
                    _ => false,
                };
                let binds_backward = i > 0 && is_companion(i - 1);

                let (position, companion) = if binds_forward {
                    (AttachmentPosition::Prefix, indices[i + 1])
                } else if binds_backward {
                    (AttachmentPosition::Suffix, indices[i - 1])
                } else if i + 1 < n && is_companion(i + 1) {
                    (AttachmentPosition::Prefix, indices[i + 1])
                } else {
                    // truncated by damage or standing alone: representable, not an error
                    (spec.default_position, None)
                };

                tokens.push(Token::Determinative {
                    display_text: format!("{{{}}}", code),
                    code: code.clone(),
                    category: spec.category,
                    position,
                    companion,
                    damage: DamageFlags::default(),
                });
            }
        }
    }

    // trailing marks describe the last sign of the chunk
    if flags.any() {
        apply_trailing_flags(&mut tokens[base..], flags);
    }
}

fn apply_trailing_flags(tokens: &mut [Token], flags: DamageFlags) {
    for token in tokens.iter_mut().rev() {
        match token {
            Token::Word { damage, .. }
            | Token::Logogram { damage, .. }
            | Token::Determinative { damage, .. }
            | Token::Broken { damage, .. } => {
                damage.merge(flags);
                return;
            }
            Token::Punctuation { .. } => continue,
        }
    }
}

// The dictionary handle is a pure function of the display text and the
// tokenization mode, so repeated forms always produce identical keys.
pub fn lookup_key_for(display_text: &str, mode: TokenizationMode) -> String {
    match mode {
        TokenizationMode::Indexed => display_text.to_owned(),
        TokenizationMode::Unindexed => display_text
            .split('-')
            .map(strip_sub_index)
            .collect::<Vec<_>>()
            .join("-"),
    }
}

// `du3` -> `du`; a digits-only sign is a numeral and is kept verbatim
fn strip_sub_index(sign: &str) -> &str {
    static REGEX_SUB_INDEX: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<base>.*[^0-9])[0-9]+$").unwrap());

    match REGEX_SUB_INDEX.captures(sign) {
        Some(caps) => caps.name("base").unwrap().as_str(),
        None => sign,
    }
}
