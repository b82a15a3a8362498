//! Request and response bodies for the HTTP API.
//!
//! Request types carry `validator` rules for the cheap shape checks; the
//! domain newtypes re-validate when the use cases build them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use herobook_domain::{
    Character, CharacterId, CombatOverrides, CoreStats, LevelChange, Monster, MonsterId, User,
    UserId,
};

use crate::use_cases::{CharacterUpdate, MonsterUpdate, NewCharacter, NewMonster};

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 512))]
    pub credential_hash: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            avatar_path: user.avatar_path().map(str::to_string),
            created_at: user.created_at(),
        }
    }
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCharacterRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub class: String,
    pub race: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub background: Option<String>,
    #[validate(length(max = 200))]
    pub subclass: Option<String>,
    #[serde(default)]
    pub abilities: BTreeMap<String, i32>,
    #[serde(default)]
    pub saving_throws: BTreeMap<String, bool>,
    #[serde(default)]
    pub skills: BTreeMap<String, bool>,
    pub experience: Option<u32>,
    #[validate(length(max = 512))]
    pub image_path: Option<String>,
    #[validate(length(max = 512))]
    pub icon_path: Option<String>,
}

impl From<CreateCharacterRequest> for NewCharacter {
    fn from(req: CreateCharacterRequest) -> Self {
        Self {
            name: req.name,
            class: req.class,
            race: req.race,
            alignment: req.alignment,
            size: req.size,
            description: req.description,
            background: req.background,
            subclass: req.subclass,
            abilities: req.abilities,
            saving_throws: req.saving_throws,
            skills: req.skills,
            experience: req.experience,
            image_path: req.image_path,
            icon_path: req.icon_path,
        }
    }
}

/// Combat fields a caller may set by hand. Flattened into update bodies.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CombatFields {
    #[validate(range(min = 0, max = 100))]
    pub armor_class: Option<i32>,
    #[validate(range(min = 0, max = 500))]
    pub speed: Option<i32>,
    #[validate(range(min = 0))]
    pub hit_points: Option<i32>,
    pub current_hit_points: Option<i32>,
    #[validate(range(min = 0))]
    pub temp_hit_points: Option<i32>,
    pub hit_dice: Option<String>,
}

impl From<CombatFields> for CombatOverrides {
    fn from(fields: CombatFields) -> Self {
        Self {
            armor_class: fields.armor_class,
            speed: fields.speed,
            hit_points: fields.hit_points,
            current_hit_points: fields.current_hit_points,
            temp_hit_points: fields.temp_hit_points,
            hit_dice: fields.hit_dice,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCharacterRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub class: Option<String>,
    pub race: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub background: Option<String>,
    #[validate(length(max = 200))]
    pub subclass: Option<String>,
    pub experience: Option<u32>,
    #[serde(default)]
    pub abilities: BTreeMap<String, i32>,
    #[serde(default)]
    pub saving_throws: BTreeMap<String, bool>,
    #[serde(default)]
    pub skills: BTreeMap<String, bool>,
    #[serde(flatten)]
    #[validate(nested)]
    pub combat: CombatFields,
    #[serde(default)]
    pub recompute_combat_stats: bool,
}

impl From<UpdateCharacterRequest> for CharacterUpdate {
    fn from(req: UpdateCharacterRequest) -> Self {
        Self {
            name: req.name,
            class: req.class,
            race: req.race,
            alignment: req.alignment,
            size: req.size,
            description: req.description,
            background: req.background,
            subclass: req.subclass,
            experience: req.experience,
            abilities: req.abilities,
            saving_throws: req.saving_throws,
            skills: req.skills,
            combat: req.combat.into(),
            recompute_combat_stats: req.recompute_combat_stats,
        }
    }
}

/// Partial ability scores and proficiency flags, keyed by their wire names.
#[derive(Debug, Default, Deserialize)]
pub struct StatPatchRequest {
    #[serde(default)]
    pub abilities: BTreeMap<String, i32>,
    #[serde(default)]
    pub saving_throws: BTreeMap<String, bool>,
    #[serde(default)]
    pub skills: BTreeMap<String, bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AwardExperienceRequest {
    #[validate(range(min = 1))]
    pub amount: u32,
}

/// `null`/absent leaves a path unchanged, `""` clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateImagesRequest {
    #[validate(length(max = 512))]
    pub image_path: Option<String>,
    #[validate(length(max = 512))]
    pub icon_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CharacterResponse {
    pub id: CharacterId,
    #[serde(flatten)]
    pub core: CoreStats,
    pub level: u8,
    pub experience: u32,
    pub class: String,
    pub background: Option<String>,
    pub subclass: Option<String>,
    pub saving_throws: BTreeMap<String, bool>,
    pub skills: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Character> for CharacterResponse {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id(),
            core: character.core().clone(),
            level: character.core().level(),
            experience: character.core().experience(),
            class: character.class().to_string(),
            background: character.background().map(str::to_string),
            subclass: character.subclass().map(str::to_string),
            saving_throws: character.saving_throws().to_stored(),
            skills: character.skills().to_stored(),
            created_at: character.created_at(),
            updated_at: character.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExperienceResponse {
    pub character: CharacterResponse,
    #[serde(flatten)]
    pub change: LevelChange,
}

// =============================================================================
// Monsters
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMonsterRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub monster_type: String,
    pub race: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[serde(default)]
    pub abilities: BTreeMap<String, i32>,
    #[serde(default)]
    pub challenge_rating: f64,
    #[serde(default)]
    pub experience_points: u32,
    #[serde(flatten)]
    #[validate(nested)]
    pub combat: CombatFields,
}

impl From<CreateMonsterRequest> for NewMonster {
    fn from(req: CreateMonsterRequest) -> Self {
        Self {
            name: req.name,
            monster_type: req.monster_type,
            race: req.race,
            alignment: req.alignment,
            size: req.size,
            description: req.description,
            abilities: req.abilities,
            challenge_rating: req.challenge_rating,
            experience_points: req.experience_points,
            combat: req.combat.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMonsterRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub monster_type: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[serde(default)]
    pub abilities: BTreeMap<String, i32>,
    pub challenge_rating: Option<f64>,
    pub experience_points: Option<u32>,
    #[serde(flatten)]
    #[validate(nested)]
    pub combat: CombatFields,
}

impl From<UpdateMonsterRequest> for MonsterUpdate {
    fn from(req: UpdateMonsterRequest) -> Self {
        Self {
            name: req.name,
            monster_type: req.monster_type,
            alignment: req.alignment,
            size: req.size,
            description: req.description,
            abilities: req.abilities,
            challenge_rating: req.challenge_rating,
            experience_points: req.experience_points,
            combat: req.combat.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonsterResponse {
    pub id: MonsterId,
    #[serde(flatten)]
    pub core: CoreStats,
    pub monster_type: String,
    pub challenge_rating: f64,
    pub experience_points: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Monster> for MonsterResponse {
    fn from(monster: &Monster) -> Self {
        Self {
            id: monster.id(),
            core: monster.core().clone(),
            monster_type: monster.monster_type().to_string(),
            challenge_rating: monster.challenge_rating(),
            experience_points: monster.experience_points(),
            created_at: monster.created_at(),
            updated_at: monster.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herobook_domain::{CharacterClass, CharacterName, Email, Username};

    #[test]
    fn register_request_rejects_bad_email() {
        let req: RegisterUserRequest = serde_json::from_value(serde_json::json!({
            "username": "lidda",
            "email": "not-an-email",
            "credential_hash": "hash",
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_request_flattens_combat_fields() {
        let req: UpdateCharacterRequest = serde_json::from_value(serde_json::json!({
            "armor_class": 18,
            "abilities": { "constitution": 16 },
            "recompute_combat_stats": true,
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let update = CharacterUpdate::from(req);
        assert_eq!(update.combat.armor_class, Some(18));
        assert_eq!(update.abilities.get("constitution"), Some(&16));
        assert!(update.recompute_combat_stats);
    }

    #[test]
    fn negative_armor_class_fails_validation() {
        let req: UpdateCharacterRequest =
            serde_json::from_value(serde_json::json!({ "armor_class": -1 })).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn experience_award_must_be_positive() {
        let req = AwardExperienceRequest { amount: 0 };
        assert!(req.validate().is_err());
    }

    #[test]
    fn experience_past_the_last_threshold_is_accepted() {
        let update: UpdateCharacterRequest =
            serde_json::from_value(serde_json::json!({ "experience": 400_000 })).unwrap();
        assert!(update.validate().is_ok());

        let create: CreateCharacterRequest = serde_json::from_value(serde_json::json!({
            "name": "Krusk",
            "class": "Barbarian",
            "experience": 400_000,
        }))
        .unwrap();
        assert!(create.validate().is_ok());

        assert!(AwardExperienceRequest { amount: 400_000 }.validate().is_ok());
    }

    #[test]
    fn character_response_exposes_level_and_proficiencies() {
        let mut character = Character::new(
            CharacterName::new("Tordek").unwrap(),
            CharacterClass::Fighter,
            Utc::now(),
        );
        character.core_mut().set_experience(6500);

        let json = serde_json::to_value(CharacterResponse::from(&character)).unwrap();
        assert_eq!(json["level"], 5);
        assert_eq!(json["experience"], 6500);
        assert_eq!(json["name"], "Tordek");
        assert!(json["skills"].is_object());
    }

    #[test]
    fn user_response_omits_credential_hash() {
        let user = User::new(
            Username::new("regdar").unwrap(),
            Email::new("regdar@example.com").unwrap(),
            "$argon2id$secret",
            Utc::now(),
        );

        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("credential_hash"));
    }
}
