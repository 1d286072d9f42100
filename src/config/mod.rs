//! Configuration for the binwatch console.
//!
//! Layered, lowest to highest precedence:
//!
//! 1. **Built-in defaults** — local backend at `http://127.0.0.1:8000/api`
//! 2. **User config** — `~/.binwatch/config.toml`
//! 3. **Environment variables** — `BINWATCH_*` overrides
//!
//! A malformed config file is silently ignored rather than failing the
//! command; `binwatch config show` reveals what actually took effect.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend REST API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timeout_ms: 30_000,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration: defaults → config file → env vars.
pub fn load() -> Config {
    let mut config = Config::default();

    if let Some(file) = load_toml_file(config_path()) {
        config = file;
    }

    apply_env_overrides(&mut config);
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();

    config
}

fn load_toml_file(path: Option<PathBuf>) -> Option<Config> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

/// Apply environment variable overrides (highest precedence layer).
///
/// - `BINWATCH_API_URL` — backend base URL
/// - `BINWATCH_TIMEOUT_MS` — request timeout in milliseconds
fn apply_env_overrides(config: &mut Config) {
    if let Ok(val) = std::env::var("BINWATCH_API_URL")
        && !val.is_empty()
    {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("BINWATCH_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.api.timeout_ms = ms;
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user config: `~/.binwatch/config.toml`.
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".binwatch").join("config.toml"))
}

/// Config file path for display purposes.
pub fn config_file() -> Option<PathBuf> {
    config_path()
}

// ---------------------------------------------------------------------------
// Config init / set / show
// ---------------------------------------------------------------------------

/// Write the default config to `~/.binwatch/config.toml`.
///
/// Returns an error if the file already exists, unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.binwatch/ directory")?;
    }

    let toml_str =
        toml::to_string_pretty(&Config::default()).context("failed to serialize default config")?;
    fs::write(&path, toml_str).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key (dotted, e.g. `api.base_url`) in the config file.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = config_path().context("could not determine home directory")?;

    // Start from the existing file, or serialized defaults if there is none.
    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&Config::default()).context("failed to serialize defaults")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML")?;
    set_toml_value(&mut root, key, value)?;

    // Reject edits that produce a config we cannot read back.
    let output = toml::to_string_pretty(&root).context("failed to serialize config")?;
    let _: Config = toml::from_str(&output)
        .with_context(|| format!("'{value}' is not a valid value for '{key}'"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.is_empty() || parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("invalid config key '{key}'");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];
    let table = current
        .as_table_mut()
        .with_context(|| format!("expected a table above '{leaf}' in '{key}'"))?;

    // Parse the new value to match the type of the existing one.
    let new_value = match table.get(leaf) {
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(matches!(
            raw_value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )),
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// The effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.api.timeout_ms, 30_000);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: Config =
            toml::from_str("[api]\nbase_url = \"https://waste.example/api\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://waste.example/api");
        assert_eq!(config.api.timeout_ms, 30_000);
    }

    #[test]
    fn set_toml_value_updates_string_key() {
        let mut root: toml::Value =
            toml::from_str("[api]\nbase_url = \"http://127.0.0.1:8000/api\"\n").unwrap();
        set_toml_value(&mut root, "api.base_url", "https://waste.example/api").unwrap();
        assert_eq!(
            root["api"]["base_url"].as_str(),
            Some("https://waste.example/api")
        );
    }

    #[test]
    fn set_toml_value_updates_integer_key() {
        let mut root: toml::Value = toml::from_str("[api]\ntimeout_ms = 30000\n").unwrap();
        set_toml_value(&mut root, "api.timeout_ms", "5000").unwrap();
        assert_eq!(root["api"]["timeout_ms"].as_integer(), Some(5000));
    }

    #[test]
    fn set_toml_value_rejects_unknown_section() {
        let mut root: toml::Value = toml::from_str("[api]\ntimeout_ms = 30000\n").unwrap();
        assert!(set_toml_value(&mut root, "nope.key", "x").is_err());
    }

    #[test]
    fn effective_config_serializes_back_to_toml() {
        let toml_str = show_effective_config().unwrap();
        let _: Config = toml::from_str(&toml_str).unwrap();
    }
}
