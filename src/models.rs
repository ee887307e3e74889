use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::names;

/// One card of one character. `char_id` is the character's stable identity,
/// `card_id` identifies the specific artwork/variant. Trivia values are flat
/// strings, with `"N/A"` standing in for anything the source data lacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub card_id: String,
    pub char_id: String,
    pub name_en: String,
    /// Set on unique records when a matching portrait exists.
    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl CharacterRecord {
    /// Trivia value for a clue field, `"N/A"` when the record has none.
    pub fn clue(&self, field: &str) -> &str {
        self.fields
            .get(field)
            .map(String::as_str)
            .unwrap_or(names::NOT_AVAILABLE)
    }
}

/// The document the quiz fetches: every card variant, plus one entry per
/// character (first card seen wins) for the guess dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDataset {
    pub characters: Vec<CharacterRecord>,
    #[serde(rename = "uniqueCharacters")]
    pub unique_characters: Vec<CharacterRecord>,
}
