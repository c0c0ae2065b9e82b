use crate::models::file_metadata::{FileMetadata, NewFileMetadata};
use diesel::r2d2::PoolError;
use thiserror::Error;

pub mod file_metadata;
#[cfg(test)]
pub mod memory;

pub use file_metadata::PgFileMetadataRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("could not get a database connection: {0}")]
    Pool(#[from] PoolError),
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("database task was cancelled")]
    Blocking,
}

/// Persistence for upload metadata records.
///
/// Calls are blocking; handlers run them on the blocking thread pool.
pub trait FileMetadataRepository: Send + Sync {
    /// Inserts a record; the store assigns `id` and `uploaded_at`.
    fn create(&self, new: &NewFileMetadata) -> Result<FileMetadata, RepositoryError>;

    /// Returns up to `limit` records in insertion order, skipping the first `offset`.
    fn list(&self, offset: i64, limit: i64) -> Result<Vec<FileMetadata>, RepositoryError>;
}
