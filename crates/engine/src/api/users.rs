//! Account handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use super::auth::CurrentUser;
use super::dto::{CharacterResponse, RegisterUserRequest, UserResponse};
use super::error::ApiError;
use crate::app::App;

pub(super) async fn register(
    State(app): State<Arc<App>>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate()?;
    let user = app
        .use_cases
        .users
        .register(req.username, req.email, req.credential_hash)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

pub(super) async fn me(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app.use_cases.users.get(user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub(super) async fn my_characters(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<CharacterResponse>>, ApiError> {
    let characters = app.use_cases.characters.list_mine(user_id).await?;
    Ok(Json(characters.iter().map(CharacterResponse::from).collect()))
}
