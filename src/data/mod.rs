pub mod flatten;
pub mod merge;

use std::path::Path;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;

use crate::models::CharacterDataset;

/// The quiz's single static-file fetch: a generated dataset document, read
/// from a local path or GET from a URL.
pub async fn load_dataset(source: &str) -> Result<CharacterDataset> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let resp = reqwest::get(source)
            .await
            .wrap_err_with(|| format!("could not fetch {source}"))?;
        if !resp.status().is_success() {
            bail!("dataset endpoint returned {}", resp.status());
        }
        resp.json()
            .await
            .wrap_err_with(|| format!("invalid dataset document at {source}"))
    } else {
        let content = tokio::fs::read_to_string(source)
            .await
            .wrap_err_with(|| format!("could not read {source}"))?;
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("invalid dataset document at {source}"))
    }
}

/// Names of the `*.json` files in a directory, sorted so every run sees the
/// same order regardless of how the OS lists them.
pub(crate) async fn list_json_files(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .wrap_err_with(|| format!("could not list {}", dir.display()))?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".json") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
