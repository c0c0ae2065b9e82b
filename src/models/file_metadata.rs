use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

/// A stored upload as recorded in the `file_metadata` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::file_metadata)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FileMetadata {
    pub id: i32,
    pub original_filename: String,
    pub system_filename: String,
    pub file_size_bytes: i64,
    pub uploaded_at: NaiveDateTime,
}

/// Insert payload; `id` and `uploaded_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = crate::schema::file_metadata)]
pub struct NewFileMetadata {
    pub original_filename: String,
    pub system_filename: String,
    pub file_size_bytes: i64,
}
