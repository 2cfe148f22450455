use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{DirEntry, Location, ReadHandle, Storage, StorageKind};
use crate::error::{StorageError, StorageResult};

pub struct LocalStorage {
    location: Location,
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let root = path.as_ref().to_path_buf();
        let location = Location::new(StorageKind::Local, root.to_string_lossy());
        Self { location, root }
    }

    /// Join `parts` under the root. Root and drive prefixes in a part are
    /// dropped so an absolute-looking key still resolves inside the root.
    fn full_path(&self, parts: &[&str]) -> PathBuf {
        let mut full = self.root.clone();
        for part in parts {
            for component in Path::new(part).components() {
                match component {
                    Component::Prefix(_) | Component::RootDir => {}
                    other => full.push(other),
                }
            }
        }
        full
    }
}

#[async_trait]
impl Storage for LocalStorage {
    fn location(&self) -> &Location {
        &self.location
    }

    async fn make_dir(&self, name: &str, path: &str) -> StorageResult<()> {
        let full = self.full_path(&[path, name]);
        debug!(path = %full.display(), "creating directory");
        tokio::fs::create_dir_all(&full).await?;
        Ok(())
    }

    async fn write(&self, key: &str, content: &[u8]) -> StorageResult<()> {
        if content.is_empty() {
            return Ok(());
        }
        let full = self.full_path(&[key]);
        debug!(path = %full.display(), bytes = content.len(), "appending to file");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .await
            .map_err(|e| StorageError::from_io(key, e))?;
        file.write_all(content).await?;
        file.flush().await?;
        Ok(())
    }

    async fn read(&self, key: &str) -> StorageResult<ReadHandle> {
        let full = self.full_path(&[key]);
        debug!(path = %full.display(), "opening file");
        let file = tokio::fs::File::open(&full)
            .await
            .map_err(|e| StorageError::from_io(key, e))?;
        Ok(Box::new(file))
    }

    async fn list_dir(&self, key: &str) -> StorageResult<Vec<DirEntry>> {
        let dir = self.full_path(&[key]);
        debug!(path = %dir.display(), "listing directory");
        let mut read_dir = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| StorageError::from_io(key, e))?;
        let mut entries = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            entries.push(DirEntry::from_fs(&entry).await?);
        }
        Ok(entries)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let full = self.full_path(&[key]);
        debug!(path = %full.display(), "removing file");
        tokio::fs::remove_file(&full)
            .await
            .map_err(|e| StorageError::from_io(key, e))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let full = self.full_path(&[key]);
        match tokio::fs::metadata(&full).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tokio::io::AsyncReadExt;

    use super::*;

    fn setup() -> (tempfile::TempDir, LocalStorage) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("test.txt"), b"random text").unwrap();
        let subdir = dir.path().join("subdir");
        std::fs::create_dir(&subdir).unwrap();
        for i in 1..=4 {
            std::fs::File::create(subdir.join(format!("{i}.txt"))).unwrap();
        }
        let storage = LocalStorage::new(dir.path());
        (dir, storage)
    }

    async fn read_string(storage: &LocalStorage, key: &str) -> String {
        let mut handle = storage.read(key).await.unwrap();
        let mut buf = String::new();
        handle.read_to_string(&mut buf).await.unwrap();
        buf
    }

    #[tokio::test]
    async fn local_storage_lifecycle() {
        let (_dir, storage) = setup();

        assert!(storage.exists("test.txt").await.unwrap());
        assert_eq!(read_string(&storage, "test.txt").await, "random text");

        storage.delete("test.txt").await.unwrap();
        assert!(!storage.exists("test.txt").await.unwrap());
    }

    #[tokio::test]
    async fn exists_is_false_for_missing_key() {
        let (_dir, storage) = setup();
        assert!(!storage.exists("random.txt").await.unwrap());
    }

    #[tokio::test]
    async fn write_then_read_roundtrip() {
        let (dir, storage) = setup();

        storage.write("write.txt", b"random text").await.unwrap();
        assert!(storage.exists("write.txt").await.unwrap());
        assert_eq!(read_string(&storage, "write.txt").await, "random text");

        let on_disk = std::fs::read(dir.path().join("write.txt")).unwrap();
        assert_eq!(on_disk, b"random text");
    }

    #[tokio::test]
    async fn write_appends_to_existing_file() {
        let (_dir, storage) = setup();

        storage.write("test.txt", b" and more").await.unwrap();
        assert_eq!(read_string(&storage, "test.txt").await, "random text and more");
    }

    #[tokio::test]
    async fn empty_write_is_noop() {
        let (dir, storage) = setup();

        storage.write("empty.txt", b"").await.unwrap();
        assert!(!dir.path().join("empty.txt").exists());

        storage.write("test.txt", b"").await.unwrap();
        assert_eq!(read_string(&storage, "test.txt").await, "random text");
    }

    #[tokio::test]
    async fn list_dir_returns_every_entry() {
        let (_dir, storage) = setup();

        let entries = storage.list_dir("subdir").await.unwrap();
        assert_eq!(entries.len(), 4);

        let names: HashSet<_> = entries.iter().map(|e| e.name().to_string()).collect();
        let expected: HashSet<_> = (1..=4).map(|i| format!("{i}.txt")).collect();
        assert_eq!(names, expected);
        assert!(entries.iter().all(|e| !e.is_dir()));
    }

    #[tokio::test]
    async fn list_dir_flags_subdirectories() {
        let (_dir, storage) = setup();

        let entries = storage.list_dir("").await.unwrap();
        let subdir = entries.iter().find(|e| e.name() == "subdir").unwrap();
        assert!(subdir.is_dir());
        let file = entries.iter().find(|e| e.name() == "test.txt").unwrap();
        assert!(!file.is_dir());
    }

    #[tokio::test]
    async fn list_dir_missing_is_not_found() {
        let (_dir, storage) = setup();

        let err = storage.list_dir("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn make_dir_creates_chain_for_writes() {
        let (dir, storage) = setup();

        storage.make_dir("c", "a/b").await.unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
        storage.make_dir("c", "a/b").await.unwrap();

        storage.write("a/b/c/data.txt", b"nested").await.unwrap();
        assert_eq!(read_string(&storage, "a/b/c/data.txt").await, "nested");
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let (_dir, storage) = setup();

        let err = storage.write("missing/data.txt", b"x").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn read_and_delete_missing_are_not_found() {
        let (_dir, storage) = setup();

        assert!(storage.read("random.txt").await.err().unwrap().is_not_found());
        assert!(storage.delete("random.txt").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn delete_refuses_directories() {
        let (_dir, storage) = setup();

        let err = storage.delete("subdir").await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert!(storage.exists("subdir").await.unwrap());
    }

    #[tokio::test]
    async fn absolute_keys_stay_under_root() {
        let (dir, storage) = setup();
        let outside = tempfile::tempdir().unwrap();
        let key = format!("{}/escaped.txt", outside.path().display());
        let nested = dir.path().join(key.trim_start_matches('/'));
        std::fs::create_dir_all(nested.parent().unwrap()).unwrap();

        storage.write(&key, b"payload").await.unwrap();
        assert!(!outside.path().join("escaped.txt").exists());
        assert_eq!(std::fs::read(&nested).unwrap(), b"payload");
        assert!(storage.exists(&key).await.unwrap());

        storage.delete(&key).await.unwrap();
        assert!(!nested.exists());
    }

    #[tokio::test]
    async fn make_dir_ignores_leading_separators() {
        let (dir, storage) = setup();

        storage.make_dir("/inner", "/outer").await.unwrap();
        assert!(dir.path().join("outer/inner").is_dir());
    }

    #[test]
    fn location_records_root() {
        let storage = LocalStorage::new("testdir");
        assert_eq!(storage.location().kind, StorageKind::Local);
        assert_eq!(storage.location().root, "testdir");
    }
}
