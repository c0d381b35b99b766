// ATF (ASCII Transliteration Format) is the line-oriented notation used for
// digital cuneiform transliteration (https://cdli.mpiwg-berlin.mpg.de/,
// http://oracc.museum.upenn.edu/doc/help/editinginatf/).
//
// The format has no single authoritative grammar, so parsing is deliberately
// tolerant:
// - surfaces and columns have no closing markers; a scope closes implicitly
//   at the next marker of equal or higher rank
// - lines that fit no sentinel are carried through as opaque state lines
// - damaged, uncertain and corrected readings stay visible on their tokens;
//   a parse only fails for input that is not transliteration text at all

mod annotation_binder;
mod determinative;
pub mod document;
pub mod language;
pub mod legend;
pub mod line_classifier;
pub mod parser;
pub mod word_tokenizer;
