use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::models::AuthResponse;
use crate::auth::password;
use crate::database;

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let settings = &state.config.auth;
    let username = body.username.trim().to_lowercase();

    if username.chars().count() < settings.min_username_len {
        return Err(ApiError::Validation(format!(
            "Username must be at least {} characters",
            settings.min_username_len
        )));
    }
    if body.password.chars().count() < settings.min_password_len {
        return Err(ApiError::Validation(format!(
            "Password must be at least {} characters",
            settings.min_password_len
        )));
    }

    let mut conn = database::get_connection(&state.pool)?;
    if database::users::find_by_username(&mut conn, &username)?.is_some() {
        return Err(ApiError::Conflict("Username is already taken".to_string()));
    }

    let hash = password::hash_password(&body.password, settings.bcrypt_cost)?;
    let user = database::users::insert_user(&mut conn, &username, &hash, false)?;
    let token = state.tokens.issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.public(),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    let username = body.username.trim().to_lowercase();

    let mut conn = database::get_connection(&state.pool)?;
    let user = database::users::find_by_username(&mut conn, &username)?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    if !password::verify_password(&body.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = state.tokens.issue(user.id)?;

    Ok(Json(AuthResponse {
        token,
        user: user.public(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::testing;

    fn creds(username: &str, password: &str) -> Json<Credentials> {
        Json(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn signup_then_login_round_trips() {
        let state = testing::state();

        let (status, Json(created)) = signup(State(state.clone()), creds("Frodo", "ringbearer"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        // Usernames are stored trimmed and lowercased.
        assert_eq!(created.user.username, "frodo");

        let Json(session) = login(State(state.clone()), creds("frodo", "ringbearer"))
            .await
            .unwrap();
        assert_eq!(state.tokens.verify(&session.token).unwrap(), session.user.id);
    }

    #[tokio::test]
    async fn signup_rejects_short_and_duplicate_credentials() {
        let state = testing::state();

        assert!(matches!(
            signup(State(state.clone()), creds("ab", "longenough")).await,
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            signup(State(state.clone()), creds("frodo", "short")).await,
            Err(ApiError::Validation(_))
        ));

        signup(State(state.clone()), creds("frodo", "ringbearer"))
            .await
            .unwrap();
        assert!(matches!(
            signup(State(state.clone()), creds("Frodo", "ringbearer")).await,
            Err(ApiError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn login_with_bad_credentials_is_unauthorized() {
        let state = testing::state();
        signup(State(state.clone()), creds("frodo", "ringbearer"))
            .await
            .unwrap();

        assert!(matches!(
            login(State(state.clone()), creds("frodo", "wrong-password")).await,
            Err(ApiError::Unauthorized(_))
        ));
        assert!(matches!(
            login(State(state.clone()), creds("nobody", "ringbearer")).await,
            Err(ApiError::Unauthorized(_))
        ));
    }
}
