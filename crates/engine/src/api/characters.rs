//! Character handlers. Every route needs `X-User-Id`; the use cases run the
//! ownership gate.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use herobook_domain::{CharacterId, ContentName, DerivedStats, StatPatch};

use super::auth::CurrentUser;
use super::dto::{
    AwardExperienceRequest, CharacterResponse, CreateCharacterRequest, ExperienceResponse,
    StatPatchRequest, UpdateCharacterRequest, UpdateImagesRequest,
};
use super::error::ApiError;
use crate::app::App;

pub(super) async fn create(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<CharacterResponse>), ApiError> {
    req.validate()?;
    let character = app
        .use_cases
        .characters
        .create(user_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(CharacterResponse::from(&character))))
}

pub(super) async fn list_mine(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<CharacterResponse>>, ApiError> {
    let characters = app.use_cases.characters.list_mine(user_id).await?;
    Ok(Json(characters.iter().map(CharacterResponse::from).collect()))
}

pub(super) async fn get(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character = app.use_cases.characters.get(user_id, id).await?;
    Ok(Json(CharacterResponse::from(&character)))
}

pub(super) async fn update(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
    Json(req): Json<UpdateCharacterRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    req.validate()?;
    let character = app
        .use_cases
        .characters
        .update(user_id, id, req.into())
        .await?;
    Ok(Json(CharacterResponse::from(&character)))
}

pub(super) async fn delete(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
) -> Result<StatusCode, ApiError> {
    app.use_cases.characters.delete(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn get_stats(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
) -> Result<Json<DerivedStats>, ApiError> {
    let stats = app.use_cases.characters.get_stats(user_id, id).await?;
    Ok(Json(stats))
}

pub(super) async fn patch_stats(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
    Json(req): Json<StatPatchRequest>,
) -> Result<Json<DerivedStats>, ApiError> {
    let patch = StatPatch::from_raw(req.abilities, req.saving_throws, req.skills)?;
    let stats = app
        .use_cases
        .characters
        .patch_stats(user_id, id, patch)
        .await?;
    Ok(Json(stats))
}

pub(super) async fn award_experience(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
    Json(req): Json<AwardExperienceRequest>,
) -> Result<Json<ExperienceResponse>, ApiError> {
    req.validate()?;
    let award = app
        .use_cases
        .characters
        .award_experience(user_id, id, req.amount)
        .await?;
    Ok(Json(ExperienceResponse {
        character: CharacterResponse::from(&award.character),
        change: award.change,
    }))
}

pub(super) async fn update_images(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
    Json(req): Json<UpdateImagesRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    req.validate()?;
    let character = app
        .use_cases
        .characters
        .update_images(user_id, id, req.image_path, req.icon_path)
        .await?;
    Ok(Json(CharacterResponse::from(&character)))
}

pub(super) async fn list_spells(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
) -> Result<Json<Vec<ContentName>>, ApiError> {
    Ok(Json(app.use_cases.characters.list_spells(user_id, id).await?))
}

pub(super) async fn add_spell(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path((id, name)): Path<(CharacterId, String)>,
) -> Result<Json<Vec<ContentName>>, ApiError> {
    Ok(Json(
        app.use_cases.characters.add_spell(user_id, id, name).await?,
    ))
}

pub(super) async fn list_features(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<CharacterId>,
) -> Result<Json<Vec<ContentName>>, ApiError> {
    Ok(Json(
        app.use_cases.characters.list_features(user_id, id).await?,
    ))
}

pub(super) async fn add_feature(
    State(app): State<Arc<App>>,
    CurrentUser(user_id): CurrentUser,
    Path((id, name)): Path<(CharacterId, String)>,
) -> Result<Json<Vec<ContentName>>, ApiError> {
    Ok(Json(
        app.use_cases.characters.add_feature(user_id, id, name).await?,
    ))
}
