use super::{FileMetadataRepository, RepositoryError};
use crate::models::file_metadata::{FileMetadata, NewFileMetadata};
use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process stand-in for the `file_metadata` table.
#[derive(Default)]
pub struct InMemoryFileMetadataRepository {
    rows: Mutex<Vec<FileMetadata>>,
    unavailable: AtomicBool,
}

impl InMemoryFileMetadataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn record_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query(DieselError::BrokenTransactionManager));
        }
        Ok(())
    }
}

impl FileMetadataRepository for InMemoryFileMetadataRepository {
    fn create(&self, new: &NewFileMetadata) -> Result<FileMetadata, RepositoryError> {
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();

        if rows
            .iter()
            .any(|row| row.system_filename == new.system_filename)
        {
            return Err(RepositoryError::Query(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new(String::from(
                    "duplicate key value violates unique constraint",
                )),
            )));
        }

        let record = FileMetadata {
            id: rows.len() as i32 + 1,
            original_filename: new.original_filename.clone(),
            system_filename: new.system_filename.clone(),
            file_size_bytes: new.file_size_bytes,
            uploaded_at: Utc::now().naive_utc(),
        };
        rows.push(record.clone());
        Ok(record)
    }

    fn list(&self, offset: i64, limit: i64) -> Result<Vec<FileMetadata>, RepositoryError> {
        self.check_available()?;
        let rows = self.rows.lock().unwrap();

        Ok(rows
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_meta(original: &str, system: &str, size: i64) -> NewFileMetadata {
        NewFileMetadata {
            original_filename: original.to_string(),
            system_filename: system.to_string(),
            file_size_bytes: size,
        }
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let repo = InMemoryFileMetadataRepository::new();

        let a = repo.create(&new_meta("a.txt", "1.txt", 1)).unwrap();
        let b = repo.create(&new_meta("b.txt", "2.txt", 2)).unwrap();

        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(repo.list(0, 10).unwrap(), vec![a, b]);
    }

    #[test]
    fn duplicate_system_filename_is_a_unique_violation() {
        let repo = InMemoryFileMetadataRepository::new();
        repo.create(&new_meta("a.txt", "same.txt", 1)).unwrap();

        let err = repo.create(&new_meta("b.txt", "same.txt", 1)).unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Query(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _
            ))
        ));
        assert_eq!(repo.record_count(), 1);
    }
}
