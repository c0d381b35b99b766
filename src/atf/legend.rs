use std::collections::HashSet;

use crate::atf::document::{DamageFlags, LegendCategory, LegendEntry, Line, Surface, Token};

// A pure post-pass over the finished tree: one deduplicated entry per marker
// actually used by this tablet, in first-seen order. A document without
// damage markers gets no damage entries.
pub fn collect_legend(surfaces: &[Surface]) -> Vec<LegendEntry> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for surface in surfaces {
        for column in &surface.columns {
            for line in &column.lines {
                let tokens = match line {
                    Line::Content { tokens, .. } => tokens,
                    Line::State { .. } => continue,
                };

                for token in tokens {
                    collect_token(token, &mut entries, &mut seen);
                }
            }
        }
    }

    entries
}

fn collect_token(token: &Token, entries: &mut Vec<LegendEntry>, seen: &mut HashSet<String>) {
    match token {
        Token::Word { damage, .. } | Token::Logogram { damage, .. } => {
            collect_damage(damage, entries, seen);
        }

        Token::Determinative {
            code,
            category,
            damage,
            ..
        } => {
            // one entry per category, under the first code that used it
            let key = format!("determinative:{:?}", category);
            if seen.insert(key) {
                entries.push(LegendEntry {
                    symbol: format!("{{{}}}", code),
                    label: format!("{} determinative", category.label()),
                    category: LegendCategory::Determinative,
                });
            }
            collect_damage(damage, entries, seen);
        }

        Token::Broken { damage, .. } => {
            push_entry(entries, seen, "[ ]", "broken or restored span", LegendCategory::Structure);
            collect_damage(damage, entries, seen);
        }

        Token::Punctuation { .. } => {}
    }
}

fn collect_damage(
    damage: &DamageFlags,
    entries: &mut Vec<LegendEntry>,
    seen: &mut HashSet<String>,
) {
    if damage.damaged {
        push_entry(entries, seen, "#", "damaged sign", LegendCategory::Damage);
    }
    if damage.uncertain {
        push_entry(entries, seen, "?", "uncertain reading", LegendCategory::Damage);
    }
    if damage.corrected {
        push_entry(entries, seen, "!", "scribal correction", LegendCategory::Damage);
    }
}

fn push_entry(
    entries: &mut Vec<LegendEntry>,
    seen: &mut HashSet<String>,
    symbol: &str,
    label: &str,
    category: LegendCategory,
) {
    if seen.insert(symbol.to_owned()) {
        entries.push(LegendEntry {
            symbol: symbol.to_owned(),
            label: label.to_owned(),
            category,
        });
    }
}
