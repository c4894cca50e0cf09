use crate::constants::{CONFIG_FILE, DEFAULT_LIBRARY_IDS, DEFAULT_USER_AGENT};
use crate::error::{Result, SyncError};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Connection parameters and the ordered library list for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub api_key: String,
    pub user_id: String,
    pub user_agent: String,
    pub libraries: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    libraries: LibrariesSection,
}

#[derive(Debug, Deserialize)]
struct LibrariesSection {
    ids: Vec<String>,
}

impl Config {
    /// Build the run configuration from the environment, with the library
    /// list taken from `config.toml` when present.
    pub fn load() -> Result<Self> {
        let host = normalize_host(&require_env("EMBY_HOST")?);
        let api_key = require_env("EMBY_API_KEY")?;
        let user_id = require_env("EMBY_USER_ID")?;
        let user_agent =
            env::var("EMBY_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let libraries = load_library_ids(CONFIG_FILE)?;

        Ok(Self {
            host,
            api_key,
            user_id,
            user_agent,
            libraries,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    let value =
        env::var(name).map_err(|_| SyncError::Config(format!("{name} is not set")))?;
    if value.trim().is_empty() {
        return Err(SyncError::Config(format!("{name} is empty")));
    }
    Ok(value)
}

/// Collapse trailing slashes down to exactly one and default the scheme to
/// `http://` when none was given.
fn normalize_host(raw: &str) -> String {
    let host = format!("{}/", raw.trim_end_matches('/'));
    if host.starts_with("http") {
        host
    } else {
        format!("http://{host}")
    }
}

fn load_library_ids(path: &str) -> Result<Vec<String>> {
    if !Path::new(path).exists() {
        return Ok(DEFAULT_LIBRARY_IDS.iter().map(|id| id.to_string()).collect());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| SyncError::Config(format!("Failed to read config file '{path}': {e}")))?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file.libraries.ids)
}
