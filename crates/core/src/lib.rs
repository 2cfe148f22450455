pub mod backend;
pub mod error;
pub mod factory;
pub mod settings;

pub use backend::{DirEntry, Location, ReadHandle, Storage, StorageKind};
pub use error::{StorageError, StorageResult};
pub use factory::{create_storage, create_storage_with};
pub use settings::S3Settings;
