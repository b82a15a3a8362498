//! HTTP routes.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::{characters, monsters, users};
use crate::app::App;

/// All HTTP routes. Everything except health and registration requires `X-User-Id`.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        // Users
        .route("/api/users", post(users::register))
        .route("/api/users/me", get(users::me))
        .route("/api/users/me/characters", get(users::my_characters))
        // Characters
        .route("/api/characters", post(characters::create))
        .route("/api/characters/me", get(characters::list_mine))
        .route(
            "/api/characters/{id}",
            get(characters::get)
                .patch(characters::update)
                .delete(characters::delete),
        )
        .route(
            "/api/characters/{id}/stats",
            get(characters::get_stats).patch(characters::patch_stats),
        )
        .route(
            "/api/characters/{id}/experience",
            post(characters::award_experience),
        )
        .route(
            "/api/characters/{id}/images",
            patch(characters::update_images),
        )
        .route("/api/characters/{id}/spells", get(characters::list_spells))
        .route(
            "/api/characters/{id}/spells/{name}",
            post(characters::add_spell),
        )
        .route(
            "/api/characters/{id}/features",
            get(characters::list_features),
        )
        .route(
            "/api/characters/{id}/features/{name}",
            post(characters::add_feature),
        )
        // Monsters
        .route("/api/monsters", get(monsters::list).post(monsters::create))
        .route(
            "/api/monsters/{id}",
            get(monsters::get)
                .patch(monsters::update)
                .delete(monsters::delete),
        )
        .route("/api/monsters/{id}/stats", get(monsters::stats))
}

async fn health() -> &'static str {
    "OK"
}
