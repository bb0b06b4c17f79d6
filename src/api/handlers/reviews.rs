use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use super::AppState;
use super::books::aggregator;
use crate::api::error::ApiError;
use crate::api::extract::CurrentUser;
use crate::api::models::{ReviewCreatedResponse, ReviewDeletedResponse, ReviewWithReviewer};
use crate::database;
use crate::domain::{BookId, ReviewId};

#[derive(Deserialize)]
pub struct NewReview {
    #[serde(rename = "reviewText")]
    pub review_text: String,
    pub rating: i64,
}

pub async fn add_review(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<BookId>,
    Json(body): Json<NewReview>,
) -> Result<(StatusCode, Json<ReviewCreatedResponse>), ApiError> {
    let settings = &state.config.review;
    let text = body.review_text.trim().to_string();

    if text.chars().count() < settings.min_text_len {
        return Err(ApiError::Validation(format!(
            "Review text must be at least {} characters",
            settings.min_text_len
        )));
    }
    if body.rating < settings.min_rating || body.rating > settings.max_rating {
        return Err(ApiError::Validation(format!(
            "Rating must be between {} and {}",
            settings.min_rating, settings.max_rating
        )));
    }

    let mut conn = database::get_connection(&state.pool)?;
    database::books::find_by_id(&mut conn, book_id)?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    let review = database::reviews::insert_review(
        &mut conn,
        book_id,
        user.id,
        body.rating,
        &text,
        Utc::now().naive_utc(),
    )?;
    drop(conn);

    let aggregate = aggregator(&state).compute_average(book_id)?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreatedResponse {
            review,
            average_rating: aggregate.average_rating,
        }),
    ))
}

pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<BookId>,
) -> Result<Json<Vec<ReviewWithReviewer>>, ApiError> {
    let mut conn = database::get_connection(&state.pool)?;
    database::books::find_by_id(&mut conn, book_id)?
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))?;

    let listed = database::reviews::list_by_book_with_reviewer(&mut conn, book_id)?
        .into_iter()
        .map(|(review, reviewer_username)| ReviewWithReviewer {
            review,
            reviewer_username,
        })
        .collect();

    Ok(Json(listed))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<ReviewId>,
) -> Result<Json<ReviewDeletedResponse>, ApiError> {
    let mut conn = database::get_connection(&state.pool)?;
    let review = database::reviews::find_by_id(&mut conn, review_id)?
        .ok_or_else(|| ApiError::NotFound("Review not found".to_string()))?;

    if review.reviewer_id != user.id {
        return Err(ApiError::Forbidden(
            "Not authorized to delete this review".to_string(),
        ));
    }

    database::reviews::delete(&mut conn, review_id)?;
    drop(conn);

    let aggregate = aggregator(&state).compute_average(review.book_id)?;

    Ok(Json(ReviewDeletedResponse {
        message: "Review deleted successfully".to_string(),
        average_rating: aggregate.average_rating,
    }))
}
