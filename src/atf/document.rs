use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAtf {
    pub tablet_id: Option<String>,
    pub designation: Option<String>,
    pub surfaces: Vec<Surface>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surface {
    pub label: SurfaceLabel,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceLabel {
    Obverse,
    Reverse,
    Left,
    Right,
    Top,
    Bottom,
    Edge,
    Unknown,
}

impl SurfaceLabel {
    // Unrecognized surface names degrade to Unknown, never an error
    pub fn of(name: &str) -> Self {
        match name {
            "obverse" | "obv" => Self::Obverse,
            "reverse" | "rev" => Self::Reverse,
            "left" => Self::Left,
            "right" => Self::Right,
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "edge" => Self::Edge,
            _ => Self::Unknown,
        }
    }
}

// `number: None` means the surface never declared a column (implicit single column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub number: Option<usize>,
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Line {
    // $-lines and anything the classifier could not place, kept opaque
    State {
        text: String,
    },
    Content {
        // transcribed verbatim incl. prime marks / letter suffixes, never renumbered
        label: String,
        is_prime: bool,
        tokens: Vec<Token>,
        translations: BTreeMap<String, String>,
        composite: Option<CompositeReference>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Token {
    Word {
        display_text: String,
        lookup_key: String,
        damage: DamageFlags,
    },
    Logogram {
        display_text: String,
        lookup_key: String,
        damage: DamageFlags,
    },
    Determinative {
        code: String,
        display_text: String,
        category: DeterminativeCategory,
        position: AttachmentPosition,
        // index of the companion word within the same line,
        // None when the companion was truncated away by damage
        companion: Option<usize>,
        damage: DamageFlags,
    },
    Broken {
        display_text: String,
        damage: DamageFlags,
    },
    Punctuation {
        display_text: String,
    },
}

impl Token {
    pub fn display_text(&self) -> &str {
        match self {
            Token::Word { display_text, .. } => display_text,
            Token::Logogram { display_text, .. } => display_text,
            Token::Determinative { display_text, .. } => display_text,
            Token::Broken { display_text, .. } => display_text,
            Token::Punctuation { display_text } => display_text,
        }
    }

    // Punctuation, breaks and determinatives carry no dictionary handle
    pub fn lookup_key(&self) -> Option<&str> {
        match self {
            Token::Word { lookup_key, .. } => Some(lookup_key),
            Token::Logogram { lookup_key, .. } => Some(lookup_key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageFlags {
    pub damaged: bool,
    pub uncertain: bool,
    pub corrected: bool,
}

impl DamageFlags {
    pub fn any(&self) -> bool {
        self.damaged || self.uncertain || self.corrected
    }

    pub fn merge(&mut self, other: DamageFlags) {
        self.damaged |= other.damaged;
        self.uncertain |= other.uncertain;
        self.corrected |= other.corrected;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeterminativeCategory {
    Divine,
    Female,
    Male,
    Person,
    Place,
    City,
    Land,
    River,
    Mountain,
    Star,
    Wood,
    Stone,
    Leather,
    Cloth,
    Vessel,
    Plant,
    Grain,
    Fish,
    Bird,
    Bronze,
    Garden,
    Month,
    Unclassified,
}

impl DeterminativeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Divine => "divine name",
            Self::Female => "female personal name",
            Self::Male => "male personal name",
            Self::Person => "person or profession",
            Self::Place => "place name",
            Self::City => "city name",
            Self::Land => "land or country",
            Self::River => "river name",
            Self::Mountain => "mountain name",
            Self::Star => "star or constellation",
            Self::Wood => "wooden object",
            Self::Stone => "stone object",
            Self::Leather => "leather object",
            Self::Cloth => "cloth or garment",
            Self::Vessel => "vessel",
            Self::Plant => "plant",
            Self::Grain => "grain",
            Self::Fish => "fish",
            Self::Bird => "bird",
            Self::Bronze => "bronze object",
            Self::Garden => "garden produce",
            Self::Month => "month name",
            Self::Unclassified => "unclassified",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeReference {
    pub target: String,
    pub line_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub symbol: String,
    pub label: String,
    pub category: LegendCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendCategory {
    Damage,
    Determinative,
    Structure,
}
