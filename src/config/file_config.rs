use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration shared by both front-ends.
///
/// ```toml
/// [filmkassen]
/// base_url = "http://localhost:8000/api"
/// timeout_sec = 10
///
/// [mitsmk]
/// base_url = "http://localhost:8001/api"
/// storage_path = "/tmp/mitsmk-session.json"
/// ```
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct FileConfig {
    pub filmkassen: Option<AppSection>,
    pub mitsmk: Option<AppSection>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AppSection {
    pub base_url: Option<String>,
    /// 0 disables the request timeout.
    pub timeout_sec: Option<u64>,
    pub storage_path: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
