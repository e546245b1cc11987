use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// Path-addressed file storage for page assets.
///
/// All paths are relative virtual paths (`blog/resume/intro.pdf`). Implementations
/// must reject paths that escape the storage root.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// List the plain file names directly inside `dir`, sorted.
    ///
    /// A missing directory yields an empty listing.
    async fn list(&self, dir: &str) -> Result<Vec<String>, StorageError>;

    /// Check whether a file exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Write `data` to `path`, replacing any previous file.
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve a file as a streaming async reader.
    async fn get_stream(&self, path: &str) -> Result<BoxReader, StorageError>;

    /// Retrieve all bytes of a file.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let mut reader = self.get_stream(path).await?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await?;
        Ok(buf)
    }

    /// Delete the file at `path`.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Get the size of a file in bytes.
    async fn size(&self, path: &str) -> Result<u64, StorageError>;

    /// Create `dir` and its parents if missing.
    async fn ensure_dir(&self, dir: &str) -> Result<(), StorageError>;
}
