//! Runtime configuration.
//!
//! Layers, lowest to highest precedence: built-in defaults, a JSON config
//! file, `LEAFSCAN_*` environment variables, then command-line flags (applied
//! by the binaries through [`Config::with_overrides`]).

use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_FIELD_NAME;
use crate::error::{LeafscanError, LeafscanResult};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";

pub const ENV_API_URL: &str = "LEAFSCAN_API_URL";
pub const ENV_FIELD_NAME: &str = "LEAFSCAN_FIELD_NAME";
pub const ENV_LOG_DIR: &str = "LEAFSCAN_LOG_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL the classify path is joined onto
    pub api_url: Url,
    /// Multipart field carrying the image
    pub field_name: String,
    /// Where to append JSONL diagnostics, if anywhere
    pub log_dir: Option<PathBuf>,
}

/// On-disk shape. Every key is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    field_name: Option<String>,
    log_dir: Option<PathBuf>,
}

/// Values supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub field_name: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/leafscan/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("leafscan").join("config.json"))
    }

    /// Resolve the full configuration.
    ///
    /// An explicit `path` must exist. The default path is optional.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> LeafscanResult<Self> {
        let file = match path {
            Some(p) => Some(read_file(p)?),
            None => match Self::default_path() {
                Some(p) if p.exists() => Some(read_file(&p)?),
                _ => None,
            },
        };

        let mut config = Config::default();
        if let Some(file) = file {
            config.apply(Overrides {
                api_url: file.api_url,
                field_name: file.field_name,
                log_dir: file.log_dir,
            })?;
        }
        config.apply(Overrides::from_env())?;
        config.apply(overrides)?;
        Ok(config)
    }

    /// Apply one layer on top of this config.
    pub fn with_overrides(mut self, overrides: Overrides) -> LeafscanResult<Self> {
        self.apply(overrides)?;
        Ok(self)
    }

    fn apply(&mut self, layer: Overrides) -> LeafscanResult<()> {
        if let Some(url) = layer.api_url {
            self.api_url = parse_api_url(&url)?;
        }
        if let Some(field) = layer.field_name {
            let field = field.trim();
            if field.is_empty() {
                return Err(LeafscanError::Config("field name must not be empty".into()));
            }
            self.field_name = field.to_string();
        }
        if let Some(dir) = layer.log_dir {
            self.log_dir = Some(dir);
        }
        Ok(())
    }
}

impl Overrides {
    /// Read the `LEAFSCAN_*` environment variables. Empty values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_url: get(ENV_API_URL),
            field_name: get(ENV_FIELD_NAME),
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

/// Parse and normalise an API base URL so it always ends in `/`.
pub fn parse_api_url(raw: &str) -> LeafscanResult<Url> {
    let mut url =
        Url::parse(raw.trim()).map_err(|e| LeafscanError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(LeafscanError::InvalidUrl(format!(
            "{raw}: scheme must be http or https"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn read_file(path: &Path) -> LeafscanResult<ConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| LeafscanError::Config(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| LeafscanError::Config(format!("{}: {}", path.display(), e)))
}
