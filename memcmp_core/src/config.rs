use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_INPUT_DIR: &str = "build/memstats";
pub const DEFAULT_OUTPUT_PATH: &str = "build/memory_comparison.md";

/// Settings read from `memcmp.toml` or `[package.metadata.memcmp]`.
///
/// Every field is optional; command-line flags take precedence.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MemcmpConfig {
    pub input_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub title: Option<String>,
    pub display_prefix: Option<String>,
    pub display_suffix: Option<String>,
    pub excluded_symbol_prefix: Option<String>,
    pub allow_empty: Option<bool>,
}

pub fn discover_config_path(root: &Path) -> Option<PathBuf> {
    ["memcmp.toml", ".memcmp.toml"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

/// Loads the config for `root`: a discovered `memcmp.toml` wins, then the
/// `[package.metadata.memcmp]` table of `Cargo.toml`, then defaults.
pub fn load_memcmp_config(root: &Path) -> Result<MemcmpConfig, ConfigError> {
    if let Some(path) = discover_config_path(root) {
        return load_memcmp_config_from_path(&path);
    }

    // An unrelated, unreadable Cargo.toml must not stop the run; a broken
    // memcmp table inside it still does.
    let cargo_toml_path = root.join("Cargo.toml");
    if cargo_toml_path.is_file() {
        match read_toml_document(&cargo_toml_path) {
            Ok(document) => {
                if let Some(table_value) = extract_cargo_package_metadata_memcmp(&document) {
                    return config_from_toml_value(&cargo_toml_path, table_value);
                }
            }
            Err(err) => debug!("ignoring {}: {err}", cargo_toml_path.display()),
        }
    }

    Ok(MemcmpConfig::default())
}

pub fn load_memcmp_config_from_path(path: &Path) -> Result<MemcmpConfig, ConfigError> {
    let document = read_toml_document(path)?;
    config_from_toml_value(path, document)
}

fn read_toml_document(path: &Path) -> Result<toml::Value, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<toml::Value>(&raw).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn config_from_toml_value(
    path: &Path,
    table_value: toml::Value,
) -> Result<MemcmpConfig, ConfigError> {
    let json_value = serde_json::to_value(table_value).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let normalized = normalize_keys_to_kebab_case(&json_value);

    serde_json::from_value::<MemcmpConfig>(normalized).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn extract_cargo_package_metadata_memcmp(value: &toml::Value) -> Option<toml::Value> {
    value
        .as_table()
        .and_then(|root| root.get("package"))
        .and_then(|package| package.as_table())
        .and_then(|package_table| package_table.get("metadata"))
        .and_then(|metadata| metadata.as_table())
        .and_then(|metadata_table| metadata_table.get("memcmp"))
        .cloned()
}

/// Accepts `input_dir` as well as `input-dir`.
fn normalize_keys_to_kebab_case(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(object) => JsonValue::Object(
            object
                .iter()
                .map(|(key, value)| (key.replace('_', "-"), normalize_keys_to_kebab_case(value)))
                .collect(),
        ),
        JsonValue::Array(items) => {
            JsonValue::Array(items.iter().map(normalize_keys_to_kebab_case).collect())
        }
        other => other.clone(),
    }
}
