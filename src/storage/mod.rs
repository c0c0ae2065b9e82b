use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub system_filename: String,
    pub size_bytes: u64,
}

#[derive(Clone)]
pub struct FilesStorage {
    upload_dir: PathBuf,
}

impl FilesStorage {
    pub fn new(upload_dir: impl AsRef<Path>) -> Self {
        Self {
            upload_dir: upload_dir.as_ref().to_path_buf(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Writes `bytes` under a freshly generated `<uuid><extension>` name.
    ///
    /// The file is created with create-new semantics, so an existing file is
    /// never replaced. A file left behind by a failed write is removed before
    /// the error is returned.
    pub async fn save(&self, bytes: &[u8], extension: &str) -> Result<StoredFile, StorageError> {
        let system_filename = format!("{}{}", Uuid::new_v4(), extension);
        let file_path = self.upload_dir.join(&system_filename);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
            .await
            .map_err(|source| StorageError::Io {
                path: file_path.clone(),
                source,
            })?;

        write_or_discard(file, &file_path, bytes).await?;

        Ok(StoredFile {
            system_filename,
            size_bytes: bytes.len() as u64,
        })
    }

    pub async fn remove(&self, system_filename: &str) -> io::Result<()> {
        tokio::fs::remove_file(self.upload_dir.join(system_filename)).await
    }

    pub fn ensure_upload_dir_exists(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)
    }
}

/// Writes all of `bytes` to `writer`; on failure the file at `path` is
/// removed so no partial upload stays behind.
async fn write_or_discard<W>(mut writer: W, path: &Path, bytes: &[u8]) -> Result<(), StorageError>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    }
    .await;
    drop(writer);

    if let Err(source) = written {
        if let Err(e) = tokio::fs::remove_file(path).await {
            log::warn!("Could not remove partial file {}: {}", path.display(), e);
        }
        return Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Returns the extension of the last path component including its dot
/// (`"report.pdf"` -> `".pdf"`), or an empty string when there is none.
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
