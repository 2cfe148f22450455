//! Object-store connection settings.
//!
//! The bucket itself is the storage root and is passed to the factory
//! separately; these settings say how to reach it.

use s3::creds::Credentials;
use s3::region::Region;

use crate::error::{StorageError, StorageResult};

pub const DEFAULT_REGION: &str = "us-east-1";

const ENV_REGION: &str = "AWS_S3_REGION";
const ENV_REGION_FALLBACK: &str = "AWS_REGION";
const ENV_ENDPOINT: &str = "AWS_S3_ENDPOINT";
const ENV_PATH_STYLE: &str = "AWS_S3_PATH_STYLE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Settings {
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, R2, ...).
    pub endpoint: Option<String>,
    /// Static credentials. When unset the client's default chain is used
    /// (environment, profile file, instance metadata).
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
    pub path_style: bool,
}

impl S3Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let region = non_empty(ENV_REGION).or_else(|| non_empty(ENV_REGION_FALLBACK));
        let path_style = non_empty(ENV_PATH_STYLE)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            region,
            endpoint: non_empty(ENV_ENDPOINT),
            access_key: None,
            secret_key: None,
            session_token: None,
            path_style,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_path_style(mut self, path_style: bool) -> Self {
        self.path_style = path_style;
        self
    }

    pub fn region_name(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub fn region(&self) -> StorageResult<Region> {
        match &self.endpoint {
            Some(endpoint) => Ok(Region::Custom {
                region: self.region_name().to_string(),
                endpoint: endpoint.clone(),
            }),
            None => self
                .region_name()
                .parse::<Region>()
                .map_err(|e| StorageError::Configuration(format!("invalid region: {e}"))),
        }
    }

    pub fn credentials(&self) -> StorageResult<Credentials> {
        let result = match (&self.access_key, &self.secret_key) {
            (Some(access_key), Some(secret_key)) => Credentials::new(
                Some(access_key.as_str()),
                Some(secret_key.as_str()),
                None,
                self.session_token.as_deref(),
                None,
            ),
            (None, None) => Credentials::default(),
            _ => {
                return Err(StorageError::Configuration(
                    "access key and secret key must be set together".to_string(),
                ));
            }
        };
        result.map_err(|e| StorageError::Configuration(format!("credentials unavailable: {e}")))
    }
}
