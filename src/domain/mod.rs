pub mod models;
pub mod stores;

pub use models::*;
pub use stores::{BookStore, ReviewStore};
