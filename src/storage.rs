//! Local state: cached auth token and recipe JSON exports.

use crate::model::Recipe;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("could not determine config directory")?
        .join("sous");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

fn token_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("token"))
}

pub fn save_token(token: &str) -> Result<()> {
    let path = token_path()?;
    fs::write(&path, token).with_context(|| format!("write {}", path.display()))
}

/// Cached bearer token from a previous login, if any.
pub fn load_token() -> Option<String> {
    let path = token_path().ok()?;
    let token = fs::read_to_string(path).ok()?;
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

pub fn clear_token() -> Result<()> {
    let path = token_path()?;
    if path.exists() {
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
    }
    Ok(())
}

/// Export a recipe as pretty JSON into the export directory, returning the
/// written path. Filenames carry a timestamp so repeated exports never clobber.
pub fn export_recipe_json(recipe: &Recipe) -> Result<PathBuf> {
    let dir = dirs::document_dir()
        .or_else(dirs::home_dir)
        .context("could not determine export directory")?
        .join("sous-exports");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

    let ts = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "now".into())
        .replace(':', "-");
    let slug: String = recipe
        .title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let path = dir.join(format!("{}_{}.json", slug.trim_matches('-'), ts));

    let body = serde_json::to_string_pretty(recipe)?;
    fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
