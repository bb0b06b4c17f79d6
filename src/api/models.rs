use serde::Serialize;

use crate::domain::{PublicUser, Review};

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Review joined with the reviewer's username for listings.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithReviewer {
    #[serde(flatten)]
    pub review: Review,
    pub reviewer_username: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreatedResponse {
    pub review: Review,
    pub average_rating: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDeletedResponse {
    pub message: String,
    pub average_rating: f64,
}
