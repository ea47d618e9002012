use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8787";

/// Everything here has a working default; the API key is only ever read
/// from the environment, never from this file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub listen_addr: Option<String>,
    pub endpoint_url: Option<String>,
    pub model: Option<String>,
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("rs_mail_summarizer"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        // create a template config for users to edit; the defaults it
        // spells out are usable as-is
        let sample = Config {
            listen_addr: Some(DEFAULT_LISTEN_ADDR.to_string()),
            endpoint_url: Some(DEFAULT_ENDPOINT_URL.to_string()),
            model: None,
        };
        let tom = toml::to_string_pretty(&sample)?;
        fs::write(&path, tom)?;
        log::info!("created template config at {}", path.display());
        return Ok(sample);
    }
    let s = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&s)?;
    Ok(cfg)
}
