use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;

use crate::auth::TokenSigner;
use crate::config::settings::AppConfig;

pub mod auth;
pub mod books;
pub mod reviews;
pub mod users;

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
    pub tokens: TokenSigner,
}

/// Raw listing query. Page values arrive as strings so bad input falls
/// back to defaults instead of failing extraction.
#[derive(Deserialize)]
pub struct BookListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}
