use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::atf::document::{AttachmentPosition, DeterminativeCategory};

#[derive(Debug, Clone, Copy)]
pub(super) struct DeterminativeSpec {
    pub category: DeterminativeCategory,
    // used when the source gives no adjacency cue (lone marker)
    pub default_position: AttachmentPosition,
}

static DETERMINATIVES: Lazy<HashMap<&'static str, DeterminativeSpec>> = Lazy::new(|| {
    use AttachmentPosition::{Prefix, Suffix};
    use DeterminativeCategory::*;

    let mut table = HashMap::new();
    let mut put = |code, category, default_position| {
        table.insert(
            code,
            DeterminativeSpec {
                category,
                default_position,
            },
        );
    };

    put("d", Divine, Prefix);
    put("f", Female, Prefix);
    put("munus", Female, Prefix);
    put("m", Male, Prefix);
    put("disz", Male, Prefix);
    put("lu2", Person, Prefix);
    put("ki", Place, Suffix);
    put("uru", City, Prefix);
    put("iri", City, Prefix);
    put("kur", Land, Prefix);
    put("id2", River, Prefix);
    put("hur-sag", Mountain, Prefix);
    put("mul", Star, Prefix);
    put("gesz", Wood, Prefix);
    put("gisz", Wood, Prefix);
    put("na4", Stone, Prefix);
    put("kusz", Leather, Prefix);
    put("tug2", Cloth, Prefix);
    put("dug", Vessel, Prefix);
    put("u2", Plant, Prefix);
    put("sze", Grain, Prefix);
    put("ku6", Fish, Suffix);
    put("muszen", Bird, Suffix);
    put("zabar", Bronze, Suffix);
    put("sar", Garden, Suffix);
    put("iti", Month, Prefix);

    table
});

// Unrecognized codes resolve to an unclassified suffix marker, never an error
pub(super) fn resolve(code: &str) -> DeterminativeSpec {
    match DETERMINATIVES.get(code) {
        Some(&spec) => spec,
        None => DeterminativeSpec {
            category: DeterminativeCategory::Unclassified,
            default_position: AttachmentPosition::Suffix,
        },
    }
}
