mod file_config;

pub use file_config::{AppSection, FileConfig};

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::api::{ApiClient, UnauthorizedPolicy};
use crate::session::FileTokenStorage;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Which front-end a configuration is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKind {
    Filmkassen,
    MitSmk,
}

impl AppKind {
    pub fn name(&self) -> &'static str {
        match self {
            AppKind::Filmkassen => "filmkassen",
            AppKind::MitSmk => "mitsmk",
        }
    }

    pub fn token_key(&self) -> &'static str {
        match self {
            AppKind::Filmkassen => crate::filmkassen::api::TOKEN_KEY,
            AppKind::MitSmk => crate::mitsmk::api::TOKEN_KEY,
        }
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        match self {
            AppKind::Filmkassen => Some(Duration::from_secs(10)),
            AppKind::MitSmk => None,
        }
    }

    pub fn unauthorized_policy(&self) -> UnauthorizedPolicy {
        match self {
            AppKind::Filmkassen => UnauthorizedPolicy::Surface,
            AppKind::MitSmk => UnauthorizedPolicy::ClearSession,
        }
    }

    fn section(&self, file: &FileConfig) -> Option<AppSection> {
        match self {
            AppKind::Filmkassen => file.filmkassen.clone(),
            AppKind::MitSmk => file.mitsmk.clone(),
        }
    }
}

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub base_url: Option<String>,
    pub timeout_sec: Option<u64>,
    pub storage_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub kind: AppKind,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub storage_path: PathBuf,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(
        cli: &CliConfig,
        file_config: Option<FileConfig>,
        kind: AppKind,
    ) -> Result<Self> {
        let section = file_config
            .as_ref()
            .and_then(|file| kind.section(file))
            .unwrap_or_default();

        let base_url = section
            .base_url
            .or_else(|| cli.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match section.timeout_sec.or(cli.timeout_sec) {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => kind.default_timeout(),
        };

        let storage_path = match section.storage_path.map(PathBuf::from) {
            Some(path) => path,
            None => match &cli.storage_path {
                Some(path) => path.clone(),
                None => default_storage_path(kind)?,
            },
        };

        Ok(Self {
            kind,
            base_url,
            timeout,
            storage_path,
        })
    }

    /// Opens the token file and builds the HTTP client for this app.
    pub fn build_client(&self) -> Result<Arc<ApiClient>> {
        debug!(
            "Building {} client for {} (session file {:?})",
            self.kind.name(),
            self.base_url,
            self.storage_path
        );
        let storage = FileTokenStorage::open(&self.storage_path)
            .with_context(|| format!("Failed to open session storage {:?}", self.storage_path))?;
        let client = ApiClient::new(
            &self.base_url,
            self.timeout,
            Arc::new(storage),
            self.kind.token_key(),
            self.kind.unauthorized_policy(),
        )
        .context("Failed to build HTTP client")?;
        Ok(Arc::new(client))
    }
}

fn default_storage_path(kind: AppKind) -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context(
        "Could not determine a data directory, pass --storage or set storage_path in the config",
    )?;
    Ok(data_dir.join("kassen").join(format!("{}.json", kind.name())))
}
