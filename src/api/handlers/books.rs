use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use super::{AppState, BookListParams};
use crate::api::error::ApiError;
use crate::api::extract::CurrentUser;
use crate::api::models::MessageResponse;
use crate::database;
use crate::database::store::{SqliteBooks, SqliteReviews};
use crate::domain::{Book, BookFilter, BookId, BookSort, BookWithRating, Page};
use crate::pagination::PageParams;
use crate::rating::RatingAggregator;

pub(crate) fn aggregator(state: &AppState) -> RatingAggregator<SqliteBooks, SqliteReviews> {
    RatingAggregator::new(
        SqliteBooks::new(state.pool.clone()),
        SqliteReviews::new(state.pool.clone()),
    )
}

pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookListParams>,
) -> Result<Json<Page<BookWithRating>>, ApiError> {
    let page_params = PageParams::coerce(
        params.page.as_deref(),
        params.limit.as_deref(),
        &state.config.pagination,
    );
    let filter = BookFilter {
        genre: params.genre,
        author: params.author,
    };
    let sort = BookSort::parse(params.sort_by.as_deref());

    let page = aggregator(&state).list_books_page(&filter, page_params, sort)?;

    Ok(Json(page))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<BookId>,
) -> Result<Json<BookWithRating>, ApiError> {
    let book = aggregator(&state).book_with_rating(book_id)?;

    Ok(Json(book))
}

#[derive(Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
}

pub async fn add_book(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let min_len = state.config.book.min_field_len;
    let title = body.title.trim();
    let author = body.author.trim();
    let genre = body.genre.trim();

    for (field, value) in [("Title", title), ("Author", author), ("Genre", genre)] {
        if value.chars().count() < min_len {
            return Err(ApiError::Validation(format!(
                "{field} must be at least {min_len} characters"
            )));
        }
    }

    let mut conn = database::get_connection(&state.pool)?;
    let book = database::books::insert_book(
        &mut conn,
        title,
        author,
        genre,
        user.id,
        Utc::now().naive_utc(),
    )?;

    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<BookId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = database::get_connection(&state.pool)?;
    let book = database::books::find_by_id(&mut conn, book_id)?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    if book.created_by != user.id {
        return Err(ApiError::Forbidden(
            "Not authorized to delete this book".to_string(),
        ));
    }

    database::books::delete(&mut conn, book_id)?;

    Ok(Json(MessageResponse {
        message: "Book deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::testing;
    use crate::domain::User;

    fn seed_user(state: &AppState, name: &str) -> User {
        let mut conn = database::get_connection(&state.pool).unwrap();
        database::users::insert_user(&mut conn, name, "hash", false).unwrap()
    }

    fn new_book(title: &str) -> Json<NewBook> {
        Json(NewBook {
            title: title.to_string(),
            author: "Tolkien".to_string(),
            genre: "Fantasy".to_string(),
        })
    }

    #[tokio::test]
    async fn add_then_get_round_trips_with_a_zero_average() {
        let state = testing::state();
        let creator = seed_user(&state, "frodo");

        let (status, Json(book)) = add_book(
            State(state.clone()),
            CurrentUser(creator),
            new_book("The Hobbit"),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(single) = get_book(State(state.clone()), Path(book.id)).await.unwrap();
        assert_eq!(single.book.title, "The Hobbit");
        assert_eq!(single.average_rating, 0.0);
    }

    #[tokio::test]
    async fn add_book_rejects_short_fields() {
        let state = testing::state();
        let creator = seed_user(&state, "frodo");

        let body = Json(NewBook {
            title: "A".to_string(),
            author: "Tolkien".to_string(),
            genre: "Fantasy".to_string(),
        });
        assert!(matches!(
            add_book(State(state.clone()), CurrentUser(creator), body).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn only_the_creator_may_delete_a_book() {
        let state = testing::state();
        let creator = seed_user(&state, "frodo");
        let other = seed_user(&state, "sam");

        let (_, Json(book)) = add_book(
            State(state.clone()),
            CurrentUser(creator.clone()),
            new_book("The Hobbit"),
        )
        .await
        .unwrap();

        assert!(matches!(
            delete_book(State(state.clone()), CurrentUser(other), Path(book.id)).await,
            Err(ApiError::Forbidden(_))
        ));

        delete_book(State(state.clone()), CurrentUser(creator), Path(book.id))
            .await
            .unwrap();
        assert!(matches!(
            get_book(State(state.clone()), Path(book.id)).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn listing_coerces_bad_query_values() {
        let state = testing::state();
        let creator = seed_user(&state, "frodo");
        for title in ["Book One", "Book Two", "Book Three"] {
            add_book(
                State(state.clone()),
                CurrentUser(creator.clone()),
                new_book(title),
            )
            .await
            .unwrap();
        }

        let params = BookListParams {
            page: Some("abc".to_string()),
            limit: Some("2".to_string()),
            genre: None,
            author: None,
            sort_by: None,
        };
        let Json(page) = list_books(State(state.clone()), Query(params)).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }
}
