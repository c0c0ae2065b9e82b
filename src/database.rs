use crate::config::DatabaseConfig;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

const CREATE_FILE_METADATA: &str =
    include_str!("../migrations/2025-06-01-000000_create_file_metadata/up.sql");

/// Builds the connection pool and verifies one connection can be opened.
pub fn create_pool(database: &DatabaseConfig, max_size: u32) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database.url());

    Pool::builder().max_size(max_size).build(manager)
}

/// Checks out a connection; it returns to the pool when dropped.
pub fn get_db_conn(pool: &DbPool) -> Result<DbConn, PoolError> {
    pool.get()
}

/// Creates the `file_metadata` table and its indexes if they are missing.
pub fn run_migrations(pool: &DbPool) -> Result<(), crate::repositories::RepositoryError> {
    let mut conn = get_db_conn(pool)?;

    conn.batch_execute(CREATE_FILE_METADATA)?;
    Ok(())
}
