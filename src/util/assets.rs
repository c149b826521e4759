use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;

use crate::domain::Rank;

/// Embed the entire `assets/` directory into the library.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static DEFAULT_CATALOG: OnceLock<Vec<Rank>> = OnceLock::new();

/// Returns the built-in rank catalog from `assets/default_catalog.json`.
pub fn default_catalog_ranks() -> &'static [Rank] {
    DEFAULT_CATALOG
        .get_or_init(|| load_json("/assets/default_catalog.json"))
        .as_slice()
}

fn load_json<T: DeserializeOwned>(path: &str) -> T {
    let asset = load_asset(path);
    serde_json::from_slice(asset.as_ref())
        .unwrap_or_else(|err| panic!("Embedded asset {path} is not valid JSON: {err}"))
}

fn load_asset(path: &str) -> Cow<'static, [u8]> {
    let canonical = canonical_asset_path(path);
    EmbeddedAssets::get(&canonical)
        .map(|file| file.data)
        .unwrap_or_else(|| panic!("Failed to locate embedded asset: {path}"))
}

fn canonical_asset_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if let Some(rest) = trimmed.strip_prefix("assets/") {
        rest.to_string()
    } else {
        trimmed.to_string()
    }
}
