use anyhow::Result;

use super::connection::{DbPool, get_connection};
use super::{books, reviews};
use crate::domain::{Book, BookFilter, BookId, BookStore, Review, ReviewStore};

/// SQLite-backed book contract. Each call checks a connection out of the
/// pool, so one instance is safe to share across requests.
#[derive(Clone)]
pub struct SqliteBooks {
    pool: DbPool,
}

impl SqliteBooks {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl BookStore for SqliteBooks {
    fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let mut conn = get_connection(&self.pool)?;
        books::find_by_id(&mut conn, id)
    }

    fn find_page(&self, filter: &BookFilter, skip: usize, limit: usize) -> Result<Vec<Book>> {
        let mut conn = get_connection(&self.pool)?;
        books::find_page(&mut conn, filter, skip, limit)
    }

    fn count(&self, filter: &BookFilter) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        books::count(&mut conn, filter)
    }
}

/// SQLite-backed review contract.
#[derive(Clone)]
pub struct SqliteReviews {
    pool: DbPool,
}

impl SqliteReviews {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ReviewStore for SqliteReviews {
    fn find_by_book(&self, book_id: BookId) -> Result<Vec<Review>> {
        let mut conn = get_connection(&self.pool)?;
        reviews::list_by_book(&mut conn, book_id)
    }
}
