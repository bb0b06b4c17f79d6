use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};

use super::error::ApiError;
use super::handlers::AppState;
use crate::database;
use crate::domain::User;

/// The authenticated account behind `Authorization: Bearer <token>`.
pub struct CurrentUser(pub User);

/// Same as [`CurrentUser`], plus the admin flag.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError::Unauthorized("Authorization token missing or malformed".to_string())
            })?;

        let user_id = state
            .tokens
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Token is invalid or expired".to_string()))?;

        let mut conn = database::get_connection(&state.pool)?;
        let user = database::users::find_by_id(&mut conn, user_id)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Ok(CurrentUser(user))
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(ApiError::Forbidden(
                "Only admin can access this route".to_string(),
            ));
        }

        Ok(AdminUser(user))
    }
}
