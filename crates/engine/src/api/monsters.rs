//! Monster handlers. Monsters are shared; any authenticated caller may use them.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use herobook_domain::{CoreDerivedStats, MonsterId};

use super::auth::CurrentUser;
use super::dto::{CreateMonsterRequest, MonsterResponse, UpdateMonsterRequest};
use super::error::ApiError;
use crate::app::App;

pub(super) async fn list(
    State(app): State<Arc<App>>,
    _user: CurrentUser,
) -> Result<Json<Vec<MonsterResponse>>, ApiError> {
    let monsters = app.use_cases.monsters.list().await?;
    Ok(Json(monsters.iter().map(MonsterResponse::from).collect()))
}

pub(super) async fn create(
    State(app): State<Arc<App>>,
    _user: CurrentUser,
    Json(req): Json<CreateMonsterRequest>,
) -> Result<(StatusCode, Json<MonsterResponse>), ApiError> {
    req.validate()?;
    let monster = app.use_cases.monsters.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(MonsterResponse::from(&monster))))
}

pub(super) async fn get(
    State(app): State<Arc<App>>,
    _user: CurrentUser,
    Path(id): Path<MonsterId>,
) -> Result<Json<MonsterResponse>, ApiError> {
    let monster = app.use_cases.monsters.get(id).await?;
    Ok(Json(MonsterResponse::from(&monster)))
}

pub(super) async fn update(
    State(app): State<Arc<App>>,
    _user: CurrentUser,
    Path(id): Path<MonsterId>,
    Json(req): Json<UpdateMonsterRequest>,
) -> Result<Json<MonsterResponse>, ApiError> {
    req.validate()?;
    let monster = app.use_cases.monsters.update(id, req.into()).await?;
    Ok(Json(MonsterResponse::from(&monster)))
}

pub(super) async fn delete(
    State(app): State<Arc<App>>,
    _user: CurrentUser,
    Path(id): Path<MonsterId>,
) -> Result<StatusCode, ApiError> {
    app.use_cases.monsters.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn stats(
    State(app): State<Arc<App>>,
    _user: CurrentUser,
    Path(id): Path<MonsterId>,
) -> Result<Json<CoreDerivedStats>, ApiError> {
    Ok(Json(app.use_cases.monsters.stats(id).await?))
}
