pub mod books;
pub mod connection;
pub mod reviews;
pub mod setup;
pub mod store;
pub mod users;

pub use connection::{DbConn, DbPool, create_pool, get_connection};

/// Path of the SQLite file, overridable for deployments.
pub fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "book_reviews.db".to_string())
}

#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    let manager = r2d2_sqlite::SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    // A single connection keeps every checkout on the same in-memory db.
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("in-memory pool");

    let mut conn = pool.get().expect("pooled connection");
    setup::reset_database(&mut conn).expect("schema");

    pool
}
