use crate::report::TierPolicy;
use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub portal: Portal,
    #[serde(default)]
    pub policy: TierPolicy,
    pub log: Log,
    pub stub: Stub,
}

#[derive(Debug, Deserialize)]
pub struct Portal {
    pub backend: String, // "fake" or "http"
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

/// Local portal stub, see `bin/portal_stub.rs`.
#[derive(Debug, Deserialize)]
pub struct Stub {
    pub address: String,
    pub username: String,
    pub password: String,
    pub captcha_length: usize,
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
