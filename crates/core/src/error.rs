use s3::error::S3Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("unsupported storage backend: {0} (supported: local, s3)")]
    UnsupportedBackend(String),

    #[error("storage configuration error: {0}")]
    Configuration(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("object store error: {0}")]
    Transport(#[from] S3Error),

    #[error("object store returned HTTP {code} for {key}")]
    Status { key: String, code: u16 },
}

impl StorageError {
    /// Classify an io error against the key it was raised for.
    pub(crate) fn from_io(key: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(key.to_string())
        } else {
            StorageError::Io(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_is_classified() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let classified = StorageError::from_io("a/b.txt", err);
        assert!(classified.is_not_found());
        assert_eq!(classified.to_string(), "not found: a/b.txt");
    }

    #[test]
    fn other_io_errors_pass_through() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let classified = StorageError::from_io("a", err);
        assert!(matches!(classified, StorageError::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied));
    }
}
