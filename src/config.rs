use crate::error::{Result, TrunkcheckError};
use crate::types::config::TrunkcheckConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "trunkcheck.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".trunkcheck/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/trunkcheck/config.toml";

/// Loads the global layer, then `trunkcheck.toml` and `.trunkcheck/local.toml`
/// from `base_dir`. Callers pass the invoking working directory so the
/// repository under analysis never configures its own scoring.
pub fn load_config(base_dir: &Path) -> Result<TrunkcheckConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(base_dir, global.as_deref())
}

pub(crate) fn load_config_with_global(
    base_dir: &Path,
    global_path: Option<&Path>,
) -> Result<TrunkcheckConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &base_dir.join(DEFAULT_CONFIG_FILE))?;
    merge_file_if_exists(&mut merged, &base_dir.join(DEFAULT_LOCAL_FILE))?;

    let cfg: TrunkcheckConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| TrunkcheckError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "loading config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| TrunkcheckError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
