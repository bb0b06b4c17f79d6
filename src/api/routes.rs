use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::json;

use crate::api::handlers::{
    AppState,
    auth::{login, signup},
    books::{add_book, delete_book, get_book, list_books},
    reviews::{add_review, delete_review, get_reviews},
    users::list_users,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/books", get(list_books).post(add_book))
        .route("/api/books/:id", get(get_book).delete(delete_book))
        // POST/GET take a book id, DELETE a review id, like the original
        // route split.
        .route(
            "/api/reviews/:id",
            post(add_review).get(get_reviews).delete(delete_review),
        )
        .route("/api/users", get(list_users))
        .fallback(not_found)
        .with_state(state)
}

async fn root() -> &'static str {
    "Book Review API running"
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}
