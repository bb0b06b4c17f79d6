use chrono::NaiveDateTime;
use serde::Serialize;

pub type UserId = i64;
pub type BookId = i64;
pub type ReviewId = i64;

/// Registered account. The password hash never leaves the server; API
/// responses use [`PublicUser`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

/// Book record. Owned by its creator; only the creator may delete it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub created_by: UserId,
    pub created_at: NaiveDateTime,
}

/// Review record. Belongs to exactly one book and one reviewer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub reviewer_id: UserId,
    pub rating: i64,
    pub review_text: String,
    pub created_at: NaiveDateTime,
}

/// Case-insensitive substring filters for book listings. An empty filter
/// matches every book.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub genre: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSort {
    Rating,
    Date,
}

impl BookSort {
    /// Unknown or missing values leave the listing in store order.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("rating") => Some(Self::Rating),
            Some("date") => Some(Self::Date),
            _ => None,
        }
    }
}

/// Book joined with its derived aggregate rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithRating {
    #[serde(flatten)]
    pub book: Book,
    pub average_rating: f64,
}

/// One listing window plus its pagination envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}
