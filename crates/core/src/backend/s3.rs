use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use s3::bucket::Bucket;
use s3::error::S3Error;
use tokio_util::io::StreamReader;
use tracing::debug;

use super::{DirEntry, Location, ReadHandle, Storage, StorageKind};
use crate::error::{StorageError, StorageResult};
use crate::settings::S3Settings;

const DELIMITER: &str = "/";

/// A listed object: its full key and reported size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
}

/// The single-request operations [`S3Storage`] needs from an object store.
///
/// Implementations report a missing object as [`StorageError::NotFound`].
#[async_trait]
pub trait ObjectClient: Send + Sync {
    async fn put(&self, key: &str, body: &[u8]) -> StorageResult<()>;
    async fn get_stream(&self, key: &str) -> StorageResult<ReadHandle>;
    async fn list(&self, prefix: &str, delimiter: &str) -> StorageResult<Vec<ObjectSummary>>;
    async fn delete(&self, key: &str) -> StorageResult<()>;
    async fn head(&self, key: &str) -> StorageResult<()>;
}

/// [`ObjectClient`] backed by a `rust-s3` bucket handle.
pub struct BucketClient {
    bucket: Box<Bucket>,
}

impl BucketClient {
    pub fn new(bucket_name: &str, settings: &S3Settings) -> StorageResult<Self> {
        let region = settings.region()?;
        let credentials = settings.credentials()?;
        let mut bucket = Bucket::new(bucket_name, region, credentials)
            .map_err(|e| StorageError::Configuration(format!("bucket {bucket_name}: {e}")))?;
        if settings.path_style {
            bucket = bucket.with_path_style();
        }
        Ok(Self { bucket })
    }
}

fn check_status(key: &str, code: u16) -> StorageResult<()> {
    match code {
        200..=299 => Ok(()),
        404 => Err(StorageError::NotFound(key.to_string())),
        code => Err(StorageError::Status {
            key: key.to_string(),
            code,
        }),
    }
}

fn classify(key: &str, err: S3Error) -> StorageError {
    match err {
        S3Error::HttpFailWithBody(404, _) => StorageError::NotFound(key.to_string()),
        err => StorageError::Transport(err),
    }
}

/// Outcome of a HEAD request: a 404, either as a status code or as an
/// `HttpFailWithBody` error, is reported as `NotFound`.
fn head_outcome(key: &str, response: Result<u16, S3Error>) -> StorageResult<()> {
    let code = response.map_err(|e| classify(key, e))?;
    check_status(key, code)
}

/// Wrap a GET body as a [`ReadHandle`], unless the status says the body is
/// an error document rather than object content.
fn stream_or_status<S>(key: &str, code: u16, body: S) -> StorageResult<ReadHandle>
where
    S: Stream<Item = Result<Bytes, S3Error>> + Send + Unpin + 'static,
{
    check_status(key, code)?;
    Ok(Box::new(StreamReader::new(body.map_err(std::io::Error::other))))
}

#[async_trait]
impl ObjectClient for BucketClient {
    async fn put(&self, key: &str, body: &[u8]) -> StorageResult<()> {
        let response = self
            .bucket
            .put_object(key, body)
            .await
            .map_err(|e| classify(key, e))?;
        check_status(key, response.status_code())
    }

    async fn get_stream(&self, key: &str) -> StorageResult<ReadHandle> {
        let response = self
            .bucket
            .get_object_stream(key)
            .await
            .map_err(|e| classify(key, e))?;
        stream_or_status(key, response.status_code, response.bytes)
    }

    async fn list(&self, prefix: &str, delimiter: &str) -> StorageResult<Vec<ObjectSummary>> {
        let pages = self
            .bucket
            .list(prefix.to_string(), Some(delimiter.to_string()))
            .await
            .map_err(|e| classify(prefix, e))?;
        Ok(pages
            .into_iter()
            .flat_map(|page| page.contents)
            .map(|obj| ObjectSummary {
                key: obj.key,
                size: obj.size,
            })
            .collect())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let response = self
            .bucket
            .delete_object(key)
            .await
            .map_err(|e| classify(key, e))?;
        check_status(key, response.status_code())
    }

    async fn head(&self, key: &str) -> StorageResult<()> {
        let response = self.bucket.head_object(key).await;
        head_outcome(key, response.map(|(_, code)| code))
    }
}

pub struct S3Storage {
    location: Location,
    client: Box<dyn ObjectClient>,
}

impl S3Storage {
    pub fn new(bucket_name: &str, settings: &S3Settings) -> StorageResult<Self> {
        let client = BucketClient::new(bucket_name, settings)?;
        debug!(bucket = bucket_name, region = settings.region_name(), "object store configured");
        Ok(Self::with_client(bucket_name, client))
    }

    pub fn with_client(bucket_name: &str, client: impl ObjectClient + 'static) -> Self {
        Self {
            location: Location::new(StorageKind::S3, bucket_name),
            client: Box::new(client),
        }
    }

    fn bucket(&self) -> &str {
        &self.location.root
    }
}

#[async_trait]
impl Storage for S3Storage {
    fn location(&self) -> &Location {
        &self.location
    }

    async fn make_dir(&self, _name: &str, _path: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn write(&self, key: &str, content: &[u8]) -> StorageResult<()> {
        if content.is_empty() {
            return Ok(());
        }
        debug!(bucket = self.bucket(), key, bytes = content.len(), "PUT object");
        self.client.put(key, content).await
    }

    async fn read(&self, key: &str) -> StorageResult<ReadHandle> {
        debug!(bucket = self.bucket(), key, "GET object");
        self.client.get_stream(key).await
    }

    async fn list_dir(&self, key: &str) -> StorageResult<Vec<DirEntry>> {
        let prefix = if key.ends_with(DELIMITER) {
            key.to_string()
        } else {
            format!("{key}{DELIMITER}")
        };
        debug!(bucket = self.bucket(), prefix = %prefix, "LIST objects");
        let objects = self.client.list(&prefix, DELIMITER).await?;
        Ok(objects
            .into_iter()
            .filter(|obj| obj.size > 0)
            .map(|obj| DirEntry::from_object_key(obj.key))
            .collect())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        debug!(bucket = self.bucket(), key, "DELETE object");
        self.client.delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        match self.client.head(key).await {
            Ok(()) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
