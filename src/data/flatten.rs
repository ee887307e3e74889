use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use futures::future::try_join_all;
use serde_json::Value;

use crate::models::{CharacterDataset, CharacterRecord};
use crate::names;

/// Dot-path fields behind the classic ten-question quiz (plus the race
/// list, which the detail pages read from the same document).
pub const STANDARD_FIELDS: &[&str] = &[
    "profile.weight",
    "profile.ears",
    "profile.weak",
    "profile.tail",
    "profile.strong",
    "charData.three_sizes",
    "charData.rl.record",
    "charData.rl.active",
    "charData.va_en",
    "title",
    "charData.rl.races",
];

/// Dot-path fields behind the 20-question random pool.
pub const RANDOM_POOL_FIELDS: &[&str] = &[
    "title",
    "profile.tagline",
    "profile.weight",
    "profile.shoes",
    "profile.dorm",
    "profile.class",
    "profile.ears",
    "profile.tail",
    "profile.strong",
    "profile.weak",
    "profile.family",
    "profile.secrets",
    "charData.va_en",
    "charData.three_sizes",
    "charData.rl.country",
    "charData.rl.death",
    "charData.rl.record",
    "charData.rl.earnings",
    "charData.rl.active",
    "release_en",
];

pub struct FlattenConfig {
    /// Directory of per-character JSON files.
    pub data_dir: PathBuf,
    /// Directory of `hd_<char_id>_<card_id>.png` portraits.
    pub image_dir: PathBuf,
    /// Prefix for generated image URLs, may be empty.
    pub base_url: String,
    pub fields: &'static [&'static str],
}

/// Flattens every character file into `{ characters, uniqueCharacters }`:
/// the configured dot-path fields keyed by their final segment, `"N/A"` for
/// anything missing, one unique entry per `char_id` (first seen wins) with
/// a portrait URL resolved by filename prefix.
pub async fn build_dataset(config: &FlattenConfig) -> Result<CharacterDataset> {
    let files = super::list_json_files(&config.data_dir).await?;
    let characters = try_join_all(
        files
            .iter()
            .map(|name| flatten_file(config.data_dir.join(name), config.fields)),
    )
    .await?;

    let mut unique_characters: Vec<CharacterRecord> = Vec::new();
    for character in &characters {
        if !unique_characters.iter().any(|c| c.char_id == character.char_id) {
            unique_characters.push(character.clone());
        }
    }

    let images = list_file_names(&config.image_dir).await?;
    for character in &mut unique_characters {
        let prefix = names::image_prefix(&character.char_id);
        character.image_url = images
            .iter()
            .find(|name| name.starts_with(&prefix))
            .map(|name| names::image_url(&config.base_url, name));
    }

    Ok(CharacterDataset {
        characters,
        unique_characters,
    })
}

/// `build_dataset` plus a pretty-printed document on disk for the client
/// to fetch.
pub async fn generate_quiz_data(
    config: &FlattenConfig,
    output_path: &Path,
) -> Result<CharacterDataset> {
    let dataset = build_dataset(config).await?;
    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output_path, serde_json::to_string_pretty(&dataset)?)
        .await
        .wrap_err_with(|| format!("could not write {}", output_path.display()))?;
    tracing::info!(
        "wrote {} ({} cards, {} characters)",
        output_path.display(),
        dataset.characters.len(),
        dataset.unique_characters.len()
    );
    Ok(dataset)
}

async fn flatten_file(path: PathBuf, fields: &'static [&'static str]) -> Result<CharacterRecord> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .wrap_err_with(|| format!("could not read {}", path.display()))?;
    let data: Value = serde_json::from_str(&content)
        .wrap_err_with(|| format!("invalid character file {}", path.display()))?;
    Ok(flatten_record(&data, fields))
}

/// One nested character document → one flat record.
pub fn flatten_record(data: &Value, fields: &[&str]) -> CharacterRecord {
    let mut record = CharacterRecord {
        card_id: scalar_string(data.get("card_id")).unwrap_or_default(),
        char_id: scalar_string(data.get("char_id")).unwrap_or_default(),
        name_en: scalar_string(data.get("name_en")).unwrap_or_default(),
        image_url: None,
        fields: BTreeMap::new(),
    };

    for field in fields {
        let key = field.rsplit('.').next().unwrap_or(field);
        let value = if key == "three_sizes" {
            three_sizes_display(data, field)
        } else {
            nested_value(data, field).and_then(display_value)
        };
        record
            .fields
            .insert(key.to_string(), value.unwrap_or_else(|| names::NOT_AVAILABLE.to_string()));
    }

    record
}

/// Resolves a dot-notation path (`"charData.rl.record"`) inside a document.
fn nested_value<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

/// Three sizes come as an object `{ b, w, h }` and get displayed as one
/// string. A bare `three_sizes` field name falls back to `charData`.
fn three_sizes_display(data: &Value, field: &str) -> Option<String> {
    let value = nested_value(data, field)
        .filter(|v| v.is_object())
        .or_else(|| {
            (field == "three_sizes")
                .then(|| nested_value(data, "charData.three_sizes"))
                .flatten()
        })?;
    let sizes = value.as_object()?;
    let b = scalar_string(sizes.get("b"))?;
    let w = scalar_string(sizes.get("w"))?;
    let h = scalar_string(sizes.get("h"))?;
    Some(format!("B{b} W{w} H{h}"))
}

/// Display form of a trivia value. `None` means "use the N/A sentinel":
/// null, empty strings and empty arrays all count as absent.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_string_ref)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => None,
    }
}

fn scalar_string(value: Option<&Value>) -> Option<String> {
    value.and_then(scalar_string_ref)
}

fn scalar_string_ref(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Every file name in a directory, sorted.
async fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .wrap_err_with(|| format!("could not list {}", dir.display()))?;
    let mut file_names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        file_names.push(entry.file_name().to_string_lossy().into_owned());
    }
    file_names.sort();
    Ok(file_names)
}
