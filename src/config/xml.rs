//! XML configuration support.
//! - Reads settings from config.xml (quick_xml + serde).
//! - Never creates or rewrites the file.
//!
//! Notes:
//! - Unknown elements and malformed values are errors, not silently ignored.
//! - Empty elements (`<log_file></log_file>`) mean "not set".

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use super::paths::{default_config_path, CONFIG_ENV_VAR};
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    log_level: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    jobs: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    max_attempts: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    initial_backoff_ms: Option<String>,
    #[serde(default, deserialize_with = "de_trimmed_opt")]
    max_backoff_ms: Option<String>,
}

// Trim surrounding whitespace; blank counts as absent.
fn de_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

fn parse_field<T: FromStr>(field: &str, value: Option<&str>) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| anyhow!("invalid <{field}> value '{v}': {e}"))
        })
        .transpose()
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();
    if let Some(level) = parse_field::<LogLevel>("log_level", parsed.log_level.as_deref())? {
        cfg.log_level = level;
    }
    cfg.log_file = parsed.log_file.map(PathBuf::from);
    if let Some(jobs) = parse_field::<usize>("jobs", parsed.jobs.as_deref())? {
        cfg.jobs = jobs;
    }
    if let Some(n) = parse_field::<u32>("max_attempts", parsed.max_attempts.as_deref())? {
        cfg.retry.max_attempts = n;
    }
    if let Some(ms) = parse_field::<u64>("initial_backoff_ms", parsed.initial_backoff_ms.as_deref())? {
        cfg.retry.initial_backoff_ms = ms;
    }
    if let Some(ms) = parse_field::<u64>("max_backoff_ms", parsed.max_backoff_ms.as_deref())? {
        cfg.retry.max_backoff_ms = ms;
    }
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("config xml '{}'", path.display()))
}

/// Load the config file, if there is one.
///
/// A path named by `BLUEPRINTS_CONFIG` must exist; a missing file at the
/// default location just means "use defaults" and yields `Ok(None)`.
pub fn load_config() -> Result<Option<(Config, PathBuf)>> {
    let explicit = env::var_os(CONFIG_ENV_VAR).is_some_and(|v| !v.is_empty());
    let Some(path) = default_config_path() else {
        debug!("No config directory available; using defaults");
        return Ok(None);
    };

    if !path.exists() {
        if explicit {
            return Err(anyhow!(
                "{CONFIG_ENV_VAR} points to '{}', which does not exist",
                path.display()
            ));
        }
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(None);
    }
    if path.is_dir() {
        return Err(anyhow!("config path '{}' is a directory", path.display()));
    }

    let cfg = load_config_from_xml_path(&path)?;
    Ok(Some((cfg, path)))
}
