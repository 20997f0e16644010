use crate::domain::constants::{DEFAULT_API_BASE, HOME_CONFIG_FILE};
use crate::error::{MalpediaError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub apikey: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Settings resolved once at startup and handed to every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub json: bool,
}

impl Config {
    /// Flag values win over the `--config` file, which wins over the home
    /// config. The key must look like a SHA-1 digest.
    pub fn resolve(
        apikey_flag: Option<&str>,
        config_path: Option<&Path>,
        base_url_flag: Option<&str>,
        json: bool,
    ) -> Result<Self> {
        let file = match config_path {
            Some(p) => load_config_file(p)?,
            None if apikey_flag.is_some() && base_url_flag.is_some() => ConfigFile::default(),
            None => match home_config_path() {
                Some(p) if p.exists() => match load_config_file(&p) {
                    Ok(f) => f,
                    // key already supplied by the flag
                    Err(e) if apikey_flag.is_some() => {
                        warn!("ignoring {}: {}", p.display(), e);
                        ConfigFile::default()
                    }
                    Err(e) => return Err(e),
                },
                _ => ConfigFile::default(),
            },
        };

        let api_key = apikey_flag
            .map(str::to_string)
            .or(file.apikey)
            .unwrap_or_default();
        if !is_api_key_valid(&api_key) {
            return Err(MalpediaError::invalid_argument(
                "no valid apikey available (expected 40 hex characters)",
            ));
        }

        let base_url = base_url_flag
            .map(str::to_string)
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            base_url,
            json,
        })
    }
}

pub fn home_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(HOME_CONFIG_FILE))
}

pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    debug!("using config file {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    if is_toml {
        toml::from_str(&raw)
            .map_err(|e| MalpediaError::Decode(format!("{}: {e}", path.display())))
    } else if raw.trim().is_empty() {
        Ok(ConfigFile::default())
    } else {
        serde_yaml::from_str(&raw)
            .map_err(|e| MalpediaError::Decode(format!("{}: {e}", path.display())))
    }
}

/// A usable key is exactly 20 bytes of hex.
pub fn is_api_key_valid(key: &str) -> bool {
    matches!(hex::decode(key), Ok(bytes) if bytes.len() == 20)
}
