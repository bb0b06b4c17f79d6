use thiserror::Error;

use super::aggregate::AggregateRating;
use crate::domain::{
    Book, BookFilter, BookId, BookSort, BookStore, BookWithRating, Page, ReviewStore,
};
use crate::pagination::{self, PageParams};

/// Error surface of the aggregation component. Store failures pass through
/// untouched so callers can tell a missing book from a broken backend.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("book not found")]
    BookNotFound,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Computes derived ratings and paginated listings over the collaborator
/// stores. Stateless: every call reads the live data, so concurrent calls
/// never interfere.
pub struct RatingAggregator<B, R> {
    books: B,
    reviews: R,
}

impl<B: BookStore, R: ReviewStore> RatingAggregator<B, R> {
    pub fn new(books: B, reviews: R) -> Self {
        Self { books, reviews }
    }

    /// Mean rating for one book, or `BookNotFound` if the id does not
    /// resolve.
    pub fn compute_average(&self, book_id: BookId) -> Result<AggregateRating, AggregateError> {
        self.books
            .find_by_id(book_id)?
            .ok_or(AggregateError::BookNotFound)?;

        self.average_of(book_id)
    }

    /// Single book joined with its aggregate.
    pub fn book_with_rating(&self, book_id: BookId) -> Result<BookWithRating, AggregateError> {
        let book = self
            .books
            .find_by_id(book_id)?
            .ok_or(AggregateError::BookNotFound)?;

        self.attach_rating(book)
    }

    /// One listing window: count the matching set, fetch the window
    /// newest-first, attach averages, then optionally re-sort.
    ///
    /// `BookSort::Rating` orders the fetched window only, not the full
    /// matching set: a page shows its own books ranked by rating while page
    /// boundaries stay fixed by creation time.
    pub fn list_books_page(
        &self,
        filter: &BookFilter,
        params: PageParams,
        sort: Option<BookSort>,
    ) -> Result<Page<BookWithRating>, AggregateError> {
        let total = self.books.count(filter)?;
        let window = self.books.find_page(filter, params.offset(), params.limit)?;

        let mut items = window
            .into_iter()
            .map(|book| self.attach_rating(book))
            .collect::<Result<Vec<_>, _>>()?;

        match sort {
            Some(BookSort::Rating) => {
                items.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
            }
            Some(BookSort::Date) => {
                items.sort_by(|a, b| {
                    (b.book.created_at, b.book.id).cmp(&(a.book.created_at, a.book.id))
                });
            }
            None => {}
        }

        Ok(Page {
            items,
            total,
            page: params.page,
            total_pages: pagination::total_pages(total, params.limit),
        })
    }

    fn average_of(&self, book_id: BookId) -> Result<AggregateRating, AggregateError> {
        let reviews = self.reviews.find_by_book(book_id)?;
        let ratings: Vec<i64> = reviews.iter().map(|review| review.rating).collect();

        Ok(AggregateRating::from_ratings(book_id, &ratings))
    }

    fn attach_rating(&self, book: Book) -> Result<BookWithRating, AggregateError> {
        let aggregate = self.average_of(book.id)?;

        Ok(BookWithRating {
            book,
            average_rating: aggregate.average_rating,
        })
    }
}
