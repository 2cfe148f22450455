pub mod local;
pub mod s3;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::{StorageError, StorageResult};

/// A live byte stream returned by [`Storage::read`]. Dropping it closes the
/// underlying file or connection.
pub type ReadHandle = Box<dyn AsyncRead + Unpin + Send>;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Backend kind and root this storage was constructed with.
    fn location(&self) -> &Location;

    /// Create the directory `path/name` under the root, with any missing
    /// parents. Succeeds if it already exists.
    async fn make_dir(&self, name: &str, path: &str) -> StorageResult<()>;

    /// Store `content` at `key`. Empty content is a no-op.
    async fn write(&self, key: &str, content: &[u8]) -> StorageResult<()>;

    async fn read(&self, key: &str) -> StorageResult<ReadHandle>;

    /// Entries directly under `key`, in the order the backend reports them.
    async fn list_dir(&self, key: &str) -> StorageResult<Vec<DirEntry>>;

    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// `Ok(false)` only when the key is absent; other failures are errors.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Local,
    S3,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::Local => "local",
            StorageKind::S3 => "s3",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(StorageKind::Local),
            "s3" => Ok(StorageKind::S3),
            other => Err(StorageError::UnsupportedBackend(other.to_string())),
        }
    }
}

/// Where a storage instance lives: a directory for `Local`, a bucket name
/// for `S3`. Fixed for the lifetime of the adapter that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub kind: StorageKind,
    pub root: String,
}

impl Location {
    pub fn new(kind: StorageKind, root: impl Into<String>) -> Self {
        Self {
            kind,
            root: root.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.root)
    }
}

/// One item from a directory listing.
///
/// For the filesystem backend `name` is the basename of the entry. For the
/// object store it is the full object key, prefix included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    name: String,
    is_dir: bool,
}

impl DirEntry {
    pub(crate) async fn from_fs(entry: &tokio::fs::DirEntry) -> std::io::Result<Self> {
        let file_type = entry.file_type().await?;
        Ok(Self {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: file_type.is_dir(),
        })
    }

    pub(crate) fn from_object_key(key: impl Into<String>) -> Self {
        let name = key.into();
        let is_dir = name.ends_with('/');
        Self { name, is_dir }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_exact_tags() {
        assert_eq!("local".parse::<StorageKind>().unwrap(), StorageKind::Local);
        assert_eq!("s3".parse::<StorageKind>().unwrap(), StorageKind::S3);

        for tag in ["", "Local", "S3", "gcs", "azure", "local "] {
            let err = tag.parse::<StorageKind>().unwrap_err();
            assert!(matches!(err, StorageError::UnsupportedBackend(ref t) if t == tag));
        }
    }

    #[test]
    fn kind_display_matches_tag() {
        assert_eq!(StorageKind::Local.to_string(), "local");
        assert_eq!(Location::new(StorageKind::S3, "bucket").to_string(), "s3:bucket");
    }

    #[test]
    fn object_entry_dir_flag_follows_delimiter() {
        let file = DirEntry::from_object_key("folder/file1.txt");
        assert_eq!(file.name(), "folder/file1.txt");
        assert!(!file.is_dir());

        let dir = DirEntry::from_object_key("folder/sub/");
        assert!(dir.is_dir());
    }
}
