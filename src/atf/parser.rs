use std::collections::BTreeMap;

use anyhow::{ensure, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::atf::{
    annotation_binder::{bind_composite, bind_translation},
    document::{Column, Line, ParsedAtf, Surface, SurfaceLabel},
    language::TokenizationMode,
    legend::collect_legend,
    line_classifier::AtfLine,
    word_tokenizer::tokenize_content,
};

// 構文解析: a single forward pass over the classified lines. ATF has no
// closing markers; a surface or column scope closes implicitly at the next
// marker of equal or higher rank, so no backtracking is ever needed.
pub fn parse_atf(lines: &[AtfLine]) -> Result<ParsedAtf> {
    ensure!(!lines.is_empty(), "Cannot parse empty line stream");
    ensure!(
        lines
            .iter()
            .any(|line| !matches!(line, AtfLine::Unclassified { .. })),
        "Input is not transliteration text"
    );

    let mut context = Context::new();

    for line in lines {
        match line {
            AtfLine::TabletId { id, designation } => context.set_tablet_id(id, designation),

            AtfLine::StateDirective { directive } => context.apply_directive(directive),

            AtfLine::SurfaceMarker { label } => context.push_surface(*label),

            AtfLine::ColumnMarker { number } => context.push_column(*number),

            AtfLine::LanguageShift { lang } => context.active_language = Some(lang.clone()),

            AtfLine::ContentLine {
                label,
                is_prime,
                text,
            } => {
                let mode =
                    TokenizationMode::for_active_language(context.active_language.as_deref());
                context.push_line(Line::Content {
                    label: label.clone(),
                    is_prime: *is_prime,
                    tokens: tokenize_content(text, mode),
                    translations: BTreeMap::new(),
                    composite: None,
                });
            }

            AtfLine::Translation { lang, text } => {
                bind_translation(context.last_content_line(), lang, text)
            }

            AtfLine::CompositeRef { text } => bind_composite(context.last_content_line(), text),

            AtfLine::Unclassified { text } => context.push_line(Line::State { text: text.clone() }),
        }
    }

    let legend = collect_legend(&context.surfaces);

    Ok(ParsedAtf {
        tablet_id: context.tablet_id,
        designation: context.designation,
        surfaces: context.surfaces,
        legend,
    })
}

struct Context {
    tablet_id: Option<String>,
    designation: Option<String>,
    surfaces: Vec<Surface>,
    active_language: Option<String>,
}

impl Context {
    fn new() -> Self {
        Context {
            tablet_id: None,
            designation: None,
            surfaces: Vec::new(),
            active_language: None,
        }
    }

    fn set_tablet_id(&mut self, id: &str, designation: &Option<String>) {
        if self.tablet_id.is_some() {
            // a second identifier line cannot replace the first; keep it visible
            let text = match designation {
                Some(designation) => format!("&{} = {}", id, designation),
                None => format!("&{}", id),
            };
            self.push_line(Line::State { text });
            return;
        }

        self.tablet_id = Some(id.to_owned());
        self.designation = designation.clone();
    }

    fn apply_directive(&mut self, directive: &str) {
        // "lang <code>" is the only directive that affects parsing;
        // the most recent one wins and is inherited until changed
        static REGEX_LANG: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^lang\s+(?P<code>\S+)$").unwrap());
        if let Some(caps) = REGEX_LANG.captures(directive) {
            self.active_language = Some(caps.name("code").unwrap().as_str().to_owned());
        }
    }

    fn push_surface(&mut self, label: SurfaceLabel) {
        self.surfaces.push(Surface {
            label,
            columns: vec![Column {
                number: None,
                lines: Vec::new(),
            }],
        });
    }

    fn push_column(&mut self, number: usize) {
        if self.surfaces.is_empty() {
            // column marker before any surface: open an implicit one
            self.surfaces.push(Surface {
                label: SurfaceLabel::Unknown,
                columns: Vec::new(),
            });
        }
        let columns = &mut self.surfaces.last_mut().unwrap().columns;

        // "@obverse" directly followed by "@column 1": the default unnumbered
        // column never held anything, so the numbered one replaces it
        if let Some(last) = columns.last() {
            if last.number.is_none() && last.lines.is_empty() {
                columns.pop();
            }
        }

        columns.push(Column {
            number: Some(number),
            lines: Vec::new(),
        });
    }

    fn push_line(&mut self, line: Line) {
        if self.surfaces.is_empty() {
            self.surfaces.push(Surface {
                label: SurfaceLabel::Unknown,
                columns: Vec::new(),
            });
        }
        let surface = self.surfaces.last_mut().unwrap();

        if surface.columns.is_empty() {
            surface.columns.push(Column {
                number: None,
                lines: Vec::new(),
            });
        }
        surface.columns.last_mut().unwrap().lines.push(line);
    }

    // the binding target for translation / composite-reference lines:
    // the most recently emitted content line of the current column
    // (state lines in between do not break the binding)
    fn last_content_line(&mut self) -> Option<&mut Line> {
        self.surfaces
            .last_mut()?
            .columns
            .last_mut()?
            .lines
            .iter_mut()
            .rev()
            .find(|line| matches!(line, Line::Content { .. }))
    }
}
