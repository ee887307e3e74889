use std::path::Path;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use serde_json::{Map, Value};

/// Profile keys carried over into the `profile_id` overlay, each defaulted
/// individually (`""`, or `[]` for `secrets`) when the translation lacks it.
const PROFILE_KEYS: &[&str] = &[
    "self_intro",
    "tagline",
    "weight",
    "shoes",
    "dorm",
    "class",
    "ears",
    "tail",
    "strong",
    "weak",
    "family",
    "secrets",
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub total: usize,
}

/// Unions the translated tree into the target tree, file by file, matched
/// by name. Purely additive: the target keeps every original field and
/// gains `profile_id` / `title_id`. A translated file with no target
/// counterpart is skipped with a warning; a broken file is counted and the
/// batch continues.
pub async fn merge_translations(translated_dir: &Path, target_dir: &Path) -> Result<MergeReport> {
    tracing::info!("starting translation merge");
    let file_names = super::list_json_files(translated_dir).await?;

    let mut report = MergeReport {
        total: file_names.len(),
        ..MergeReport::default()
    };
    for file_name in &file_names {
        let translated_path = translated_dir.join(file_name);
        let target_path = target_dir.join(file_name);
        match merge_file(&translated_path, &target_path).await {
            Ok(true) => {
                report.processed += 1;
                tracing::info!("merged: {file_name}");
            }
            Ok(false) => {
                report.skipped += 1;
                tracing::warn!("file not found in target: {file_name}");
            }
            Err(err) => {
                report.errors += 1;
                tracing::error!("error processing {file_name}: {err:#}");
            }
        }
    }

    tracing::info!(
        "translation merge complete: processed={} skipped={} errors={} total={}",
        report.processed,
        report.skipped,
        report.errors,
        report.total
    );
    Ok(report)
}

/// Merges one file pair in place. `Ok(false)` means the target file does
/// not exist (the non-fatal skip case).
async fn merge_file(translated_path: &Path, target_path: &Path) -> Result<bool> {
    let translated_content = tokio::fs::read_to_string(translated_path)
        .await
        .wrap_err_with(|| format!("could not read {}", translated_path.display()))?;
    let translated: Value = serde_json::from_str(&translated_content)
        .wrap_err_with(|| format!("invalid JSON in {}", translated_path.display()))?;

    let Ok(target_content) = tokio::fs::read_to_string(target_path).await else {
        return Ok(false);
    };
    let mut target: Value = serde_json::from_str(&target_content)
        .wrap_err_with(|| format!("invalid JSON in {}", target_path.display()))?;
    let merged = target
        .as_object_mut()
        .ok_or_else(|| eyre!("{} is not a JSON object", target_path.display()))?;

    if let Some(profile) = translated.get("profile").and_then(Value::as_object) {
        let mut profile_id = Map::new();
        for key in PROFILE_KEYS {
            let value = profile
                .get(*key)
                .filter(|v| is_present(v))
                .cloned()
                .unwrap_or_else(|| default_for(key));
            profile_id.insert((*key).to_string(), value);
        }
        merged.insert("profile_id".to_string(), Value::Object(profile_id));
    }

    if let Some(title) = translated.get("title").filter(|v| is_present(v)) {
        merged.insert("title_id".to_string(), title.clone());
    }

    tokio::fs::write(target_path, serde_json::to_string_pretty(&target)?)
        .await
        .wrap_err_with(|| format!("could not write {}", target_path.display()))?;
    Ok(true)
}

fn default_for(key: &str) -> Value {
    if key == "secrets" {
        Value::Array(Vec::new())
    } else {
        Value::String(String::new())
    }
}

/// A value worth carrying over: not null, not an empty string.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
