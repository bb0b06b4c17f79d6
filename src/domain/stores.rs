use anyhow::Result;

use super::models::{Book, BookFilter, BookId, Review};

/// Read contract over the book collection, consumed by the rating
/// aggregator. Implementations must return pages ordered by creation time
/// descending, id descending on ties.
pub trait BookStore {
    fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    fn find_page(&self, filter: &BookFilter, skip: usize, limit: usize) -> Result<Vec<Book>>;

    /// Number of books matching `filter`, ignoring pagination.
    fn count(&self, filter: &BookFilter) -> Result<usize>;
}

/// Read contract over the review collection.
pub trait ReviewStore {
    fn find_by_book(&self, book_id: BookId) -> Result<Vec<Review>>;
}
