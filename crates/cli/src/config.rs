use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use storekit_core::{S3Settings, Storage, create_storage, create_storage_with};

const CONFIG_FILE: &str = "storekit.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: BackendConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BackendConfig {
    #[serde(rename = "local")]
    Local { path: String },
    #[serde(rename = "s3")]
    S3 {
        bucket: String,
        region: Option<String>,
        endpoint: Option<String>,
        access_key: Option<String>,
        secret_key: Option<String>,
        #[serde(default)]
        path_style: bool,
    },
}

impl BackendConfig {
    pub fn tag(&self) -> &'static str {
        match self {
            BackendConfig::Local { .. } => "local",
            BackendConfig::S3 { .. } => "s3",
        }
    }

    pub fn root(&self) -> &str {
        match self {
            BackendConfig::Local { path } => path,
            BackendConfig::S3 { bucket, .. } => bucket,
        }
    }

    /// Object-store settings: the environment first, then anything the
    /// config file pins explicitly.
    pub fn s3_settings(&self) -> S3Settings {
        let mut settings = S3Settings::from_env();
        if let BackendConfig::S3 {
            region,
            endpoint,
            access_key,
            secret_key,
            path_style,
            ..
        } = self
        {
            if let Some(region) = region {
                settings.region = Some(region.clone());
            }
            if let Some(endpoint) = endpoint {
                settings.endpoint = Some(endpoint.clone());
            }
            if let (Some(access_key), Some(secret_key)) = (access_key, secret_key) {
                settings = settings.with_credentials(access_key.clone(), secret_key.clone());
            }
            settings.path_style |= *path_style;
        }
        settings
    }
}

impl AppConfig {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storekit")
            .join(CONFIG_FILE)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("config not found at {}", path.display()))?;
        toml::from_str(&content).context("failed to parse config")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn open_storage(&self) -> Result<Arc<dyn Storage>> {
        let backend = &self.storage;
        create_storage_with(backend.tag(), backend.root(), &backend.s3_settings())
            .with_context(|| format!("failed to open {} storage at {}", backend.tag(), backend.root()))
    }
}

/// Resolve the storage to operate on. `--backend`/`--root` on the command
/// line win over the saved config file.
pub fn open_storage(backend: Option<&str>, root: Option<&str>) -> Result<Arc<dyn Storage>> {
    match (backend, root) {
        (Some(backend), Some(root)) => create_storage(backend, root)
            .with_context(|| format!("failed to open {backend} storage at {root}")),
        (None, None) => AppConfig::load()?.open_storage(),
        _ => anyhow::bail!("--backend and --root must be given together"),
    }
}
