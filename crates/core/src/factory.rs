use std::sync::Arc;

use tracing::debug;

use crate::backend::local::LocalStorage;
use crate::backend::s3::S3Storage;
use crate::backend::{Storage, StorageKind};
use crate::error::StorageResult;
use crate::settings::S3Settings;

/// Build the storage backend named by `tag`, rooted at `root`.
///
/// `"local"` roots a filesystem adapter at the directory `root`; `"s3"`
/// treats `root` as a bucket name and reads connection settings from the
/// environment. Any other tag is rejected.
pub fn create_storage(tag: &str, root: &str) -> StorageResult<Arc<dyn Storage>> {
    let kind: StorageKind = tag.parse()?;
    match kind {
        StorageKind::Local => build(kind, root, &S3Settings::default()),
        StorageKind::S3 => build(kind, root, &S3Settings::from_env()),
    }
}

/// Like [`create_storage`], with object-store settings supplied by the caller.
pub fn create_storage_with(
    tag: &str,
    root: &str,
    settings: &S3Settings,
) -> StorageResult<Arc<dyn Storage>> {
    build(tag.parse()?, root, settings)
}

fn build(kind: StorageKind, root: &str, settings: &S3Settings) -> StorageResult<Arc<dyn Storage>> {
    debug!(%kind, root, "creating storage");
    match kind {
        StorageKind::Local => Ok(Arc::new(LocalStorage::new(root))),
        StorageKind::S3 => Ok(Arc::new(S3Storage::new(root, settings)?)),
    }
}
