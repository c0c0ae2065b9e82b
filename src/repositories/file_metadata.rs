use super::{FileMetadataRepository, RepositoryError};
use crate::database::{DbPool, get_db_conn};
use crate::models::file_metadata::{FileMetadata, NewFileMetadata};
use crate::schema::file_metadata::dsl::*;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::query_builder::QueryFragment;
use diesel::query_dsl::LoadQuery;

#[derive(Clone)]
pub struct PgFileMetadataRepository {
    pool: DbPool,
}

impl PgFileMetadataRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// `INSERT ... RETURNING` every column of the new row.
fn insert_query<'a>(
    new: &'a NewFileMetadata,
) -> impl RunQueryDsl<PgConnection> + LoadQuery<'a, PgConnection, FileMetadata> + QueryFragment<Pg>
{
    diesel::insert_into(file_metadata)
        .values(new)
        .returning(FileMetadata::as_returning())
}

/// One page of records in primary-key order.
fn list_query(
    offset_val: i64,
    limit_val: i64,
) -> impl RunQueryDsl<PgConnection> + LoadQuery<'static, PgConnection, FileMetadata> + QueryFragment<Pg>
{
    file_metadata
        .select(FileMetadata::as_select())
        .order(id.asc())
        .offset(offset_val)
        .limit(limit_val)
}

impl FileMetadataRepository for PgFileMetadataRepository {
    fn create(&self, new: &NewFileMetadata) -> Result<FileMetadata, RepositoryError> {
        let mut conn = get_db_conn(&self.pool)?;

        let record = insert_query(new).get_result(&mut conn)?;
        Ok(record)
    }

    fn list(&self, offset_val: i64, limit_val: i64) -> Result<Vec<FileMetadata>, RepositoryError> {
        let mut conn = get_db_conn(&self.pool)?;

        let records = list_query(offset_val, limit_val).load(&mut conn)?;
        Ok(records)
    }
}
