use std::sync::Arc;

use axum::{Json, extract::State};

use super::AppState;
use crate::api::error::ApiError;
use crate::api::extract::AdminUser;
use crate::database;
use crate::domain::{PublicUser, User};

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let mut conn = database::get_connection(&state.pool)?;
    let users = database::users::list_all(&mut conn)?;

    Ok(Json(users.iter().map(User::public).collect()))
}
