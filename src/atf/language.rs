use serde::{Deserialize, Serialize};

// Sub-index numerals are lexically significant in Sumerian only; everywhere
// else (and for undeclared languages) they merely pick a sign variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizationMode {
    Indexed,
    Unindexed,
}

impl TokenizationMode {
    pub fn for_language(code: &str) -> Self {
        // "sux/emesal" style dialect codes count as Sumerian
        let base = code.split(['/', '-']).next().unwrap_or(code);
        match base {
            "sux" | "emesal" => Self::Indexed,
            _ => Self::Unindexed,
        }
    }

    pub fn for_active_language(code: Option<&str>) -> Self {
        match code {
            Some(code) => Self::for_language(code),
            // undeclared language: avoid manufacturing false lexical distinctions
            None => Self::Unindexed,
        }
    }
}
