//! Character management use cases.
//!
//! Every operation on an existing character runs the ownership gate before
//! loading it. Writes are read-modify-write against the freshly loaded record
//! and stamp `updated_at` from the clock. A save that loses the version race
//! reloads and re-applies its change, so concurrent patches compose.

mod error;

pub use error::CharacterError;

use std::collections::BTreeMap;
use std::sync::Arc;

use herobook_domain::{
    apply_stat_patch, compute_derived_stats, initialize_combat_stats, Alignment, Character,
    CharacterClass, CharacterId, CharacterName, CombatOverrides, ContentName, CoreStats,
    DerivedStats, LevelChange, Race, Size, StatPatch, UserId,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort, OwnershipRepo, RepoError};
use crate::use_cases::ownership::OwnershipGate;

/// Load-apply-save cycles tried before reporting [`CharacterError::Conflict`].
const MAX_WRITE_ATTEMPTS: usize = 5;

// =============================================================================
// Inputs / Results
// =============================================================================

/// Input for character creation. Closed enumerations arrive as strings and
/// are parsed here so that bad values surface as `InvalidInput`.
#[derive(Debug, Clone, Default)]
pub struct NewCharacter {
    pub name: String,
    pub class: String,
    pub race: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub background: Option<String>,
    pub subclass: Option<String>,
    pub abilities: BTreeMap<String, i32>,
    pub saving_throws: BTreeMap<String, bool>,
    pub skills: BTreeMap<String, bool>,
    pub experience: Option<u32>,
    pub image_path: Option<String>,
    pub icon_path: Option<String>,
}

/// Partial update. `None` and empty maps leave the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct CharacterUpdate {
    pub name: Option<String>,
    pub class: Option<String>,
    pub race: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub background: Option<String>,
    pub subclass: Option<String>,
    pub experience: Option<u32>,
    pub abilities: BTreeMap<String, i32>,
    pub saving_throws: BTreeMap<String, bool>,
    pub skills: BTreeMap<String, bool>,
    pub combat: CombatOverrides,
    /// Re-derive HP, AC, initiative and hit dice from class and abilities.
    /// Runs before `combat` overrides are applied.
    pub recompute_combat_stats: bool,
}

/// Result of awarding experience.
#[derive(Debug, Clone)]
pub struct ExperienceAward {
    pub character: Character,
    pub change: LevelChange,
}

// =============================================================================
// Use Cases
// =============================================================================

pub struct CharacterManagement {
    characters: Arc<dyn CharacterRepo>,
    ownership: Arc<dyn OwnershipRepo>,
    gate: OwnershipGate,
    clock: Arc<dyn ClockPort>,
}

impl CharacterManagement {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        ownership: Arc<dyn OwnershipRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            characters,
            gate: OwnershipGate::new(ownership.clone()),
            ownership,
            clock,
        }
    }

    /// Create a character and link it to `owner`.
    ///
    /// Combat stats are initialized from class and abilities. If linking the
    /// owner fails the character node is deleted again before the error is
    /// returned.
    pub async fn create(
        &self,
        owner: UserId,
        input: NewCharacter,
    ) -> Result<Character, CharacterError> {
        let name = CharacterName::new(input.name)?;
        let class: CharacterClass = input.class.parse()?;
        let patch = StatPatch::from_raw(input.abilities, input.saving_throws, input.skills)?;

        let mut core = CoreStats::new(name.clone());
        if let Some(race) = input.race {
            core = core.with_race(race.parse::<Race>()?);
        }
        if let Some(alignment) = input.alignment {
            core = core.with_alignment(alignment.parse::<Alignment>()?);
        }
        if let Some(size) = input.size {
            core = core.with_size(size.parse::<Size>()?);
        }
        if let Some(description) = non_empty(input.description) {
            core = core.with_description(description);
        }
        if let Some(experience) = input.experience {
            core = core.with_experience(experience);
        }
        if let Some(path) = non_empty(input.image_path) {
            core = core.with_image_path(path);
        }
        if let Some(path) = non_empty(input.icon_path) {
            core = core.with_icon_path(path);
        }

        let mut character = Character::new(name, class, self.clock.now()).with_core(core);
        if let Some(background) = non_empty(input.background) {
            character = character.with_background(background);
        }
        if let Some(subclass) = non_empty(input.subclass) {
            character = character.with_subclass(subclass);
        }
        let character = initialize_combat_stats(apply_stat_patch(character, &patch));
        let character_id = character.id();

        self.characters.create(&character).await?;

        if let Err(err) = self.ownership.connect(character_id, owner).await {
            tracing::warn!(
                %character_id,
                user_id = %owner,
                error = %err,
                "Linking owner failed, removing character"
            );
            if let Err(rollback_err) = self.characters.delete(character_id).await {
                tracing::error!(
                    %character_id,
                    error = %rollback_err,
                    "Failed to remove character after owner link failure"
                );
            }
            return Err(match err {
                RepoError::NotFound { .. } => {
                    CharacterError::Unauthorized(format!("Unknown user {}", owner))
                }
                other => CharacterError::Repo(other),
            });
        }

        tracing::info!(%character_id, user_id = %owner, "Created character");
        Ok(character)
    }

    pub async fn get(&self, user: UserId, id: CharacterId) -> Result<Character, CharacterError> {
        self.gate.authorize(id, user).await?;
        self.load(id).await
    }

    /// Characters owned by `user`. Needs no gate: the query follows the
    /// caller's own edges.
    pub async fn list_mine(&self, user: UserId) -> Result<Vec<Character>, CharacterError> {
        Ok(self.characters.list_owned_by(user).await?)
    }

    pub async fn update(
        &self,
        user: UserId,
        id: CharacterId,
        update: CharacterUpdate,
    ) -> Result<Character, CharacterError> {
        update.combat.validate()?;
        let patch = StatPatch::from_raw(
            update.abilities.clone(),
            update.saving_throws.clone(),
            update.skills.clone(),
        )?;

        self.gate.authorize(id, user).await?;
        self.modify(id, |character| apply_update(character, &update, &patch))
            .await
    }

    /// Apply a stat patch and return the recomputed derived stats.
    pub async fn patch_stats(
        &self,
        user: UserId,
        id: CharacterId,
        patch: StatPatch,
    ) -> Result<DerivedStats, CharacterError> {
        patch.validate()?;
        self.gate.authorize(id, user).await?;

        let character = self
            .modify(id, |character| Ok(apply_stat_patch(character, &patch)))
            .await?;
        Ok(compute_derived_stats(&character))
    }

    pub async fn get_stats(
        &self,
        user: UserId,
        id: CharacterId,
    ) -> Result<DerivedStats, CharacterError> {
        let character = self.get(user, id).await?;
        Ok(compute_derived_stats(&character))
    }

    pub async fn award_experience(
        &self,
        user: UserId,
        id: CharacterId,
        amount: u32,
    ) -> Result<ExperienceAward, CharacterError> {
        self.gate.authorize(id, user).await?;

        let mut change = None;
        let character = self
            .modify(id, |mut character| {
                change = Some(character.core_mut().award_experience(amount));
                Ok(character)
            })
            .await?;
        let change = change.ok_or(CharacterError::NotFound(id))?;

        if change.leveled_up {
            tracing::info!(
                character_id = %id,
                previous_level = change.previous_level,
                new_level = change.new_level,
                "Character leveled up"
            );
        }
        Ok(ExperienceAward { character, change })
    }

    /// Record already-stored image paths. `None` leaves a path alone, an
    /// empty string clears it.
    pub async fn update_images(
        &self,
        user: UserId,
        id: CharacterId,
        image_path: Option<String>,
        icon_path: Option<String>,
    ) -> Result<Character, CharacterError> {
        self.gate.authorize(id, user).await?;

        self.modify(id, |mut character| {
            if let Some(path) = &image_path {
                character.core_mut().set_image_path(non_empty(Some(path.clone())));
            }
            if let Some(path) = &icon_path {
                character.core_mut().set_icon_path(non_empty(Some(path.clone())));
            }
            Ok(character)
        })
        .await
    }

    /// Delete the character together with its ownership, spell and feature edges.
    pub async fn delete(&self, user: UserId, id: CharacterId) -> Result<(), CharacterError> {
        self.gate.authorize(id, user).await?;

        if self.characters.delete(id).await? {
            tracing::info!(character_id = %id, "Deleted character");
            Ok(())
        } else {
            Err(CharacterError::NotFound(id))
        }
    }

    pub async fn add_spell(
        &self,
        user: UserId,
        id: CharacterId,
        spell: String,
    ) -> Result<Vec<ContentName>, CharacterError> {
        let spell = ContentName::new(spell)?;
        self.gate.authorize(id, user).await?;

        self.characters
            .add_spell(id, &spell)
            .await
            .map_err(|e| CharacterError::from_repo(id, e))?;
        Ok(self.characters.list_spells(id).await?)
    }

    pub async fn list_spells(
        &self,
        user: UserId,
        id: CharacterId,
    ) -> Result<Vec<ContentName>, CharacterError> {
        self.gate.authorize(id, user).await?;
        Ok(self.characters.list_spells(id).await?)
    }

    pub async fn add_feature(
        &self,
        user: UserId,
        id: CharacterId,
        feature: String,
    ) -> Result<Vec<ContentName>, CharacterError> {
        let feature = ContentName::new(feature)?;
        self.gate.authorize(id, user).await?;

        self.characters
            .add_feature(id, &feature)
            .await
            .map_err(|e| CharacterError::from_repo(id, e))?;
        Ok(self.characters.list_features(id).await?)
    }

    pub async fn list_features(
        &self,
        user: UserId,
        id: CharacterId,
    ) -> Result<Vec<ContentName>, CharacterError> {
        self.gate.authorize(id, user).await?;
        Ok(self.characters.list_features(id).await?)
    }

    // -------------------------------------------------------------------------

    async fn load(&self, id: CharacterId) -> Result<Character, CharacterError> {
        self.characters
            .get(id)
            .await?
            .ok_or(CharacterError::NotFound(id))
    }

    /// Load, apply `change`, save. When another write lands in between the
    /// record is reloaded and `change` applied again to the fresh copy.
    async fn modify<F>(&self, id: CharacterId, mut change: F) -> Result<Character, CharacterError>
    where
        F: FnMut(Character) -> Result<Character, CharacterError>,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let character = change(self.load(id).await?)?;
            match self.save(character).await {
                Err(CharacterError::Conflict(_)) => {
                    tracing::debug!(character_id = %id, attempt, "Stale character write, retrying");
                }
                result => return result,
            }
        }

        tracing::warn!(character_id = %id, "Giving up on contended character write");
        Err(CharacterError::Conflict(id))
    }

    async fn save(&self, mut character: Character) -> Result<Character, CharacterError> {
        character.touch(self.clock.now());
        let id = character.id();
        self.characters
            .update(&character)
            .await
            .map_err(|e| CharacterError::from_repo(id, e))?;
        character.advance_version();
        Ok(character)
    }
}

fn apply_update(
    mut character: Character,
    update: &CharacterUpdate,
    patch: &StatPatch,
) -> Result<Character, CharacterError> {
    if let Some(name) = &update.name {
        character.core_mut().set_name(CharacterName::new(name.clone())?);
    }
    if let Some(class) = &update.class {
        character.set_class(class.parse()?);
    }
    if let Some(race) = &update.race {
        character.core_mut().set_race(parse_optional::<Race>(race.clone())?);
    }
    if let Some(alignment) = &update.alignment {
        character.core_mut().set_alignment(alignment.parse()?);
    }
    if let Some(size) = &update.size {
        character.core_mut().set_size(size.parse()?);
    }
    if let Some(description) = &update.description {
        character.core_mut().set_description(non_empty(Some(description.clone())));
    }
    if let Some(background) = &update.background {
        character.set_background(non_empty(Some(background.clone())));
    }
    if let Some(subclass) = &update.subclass {
        character.set_subclass(non_empty(Some(subclass.clone())));
    }
    if let Some(experience) = update.experience {
        character.core_mut().set_experience(experience);
    }

    let mut character = apply_stat_patch(character, patch);
    if update.recompute_combat_stats {
        character = initialize_combat_stats(character);
    }
    update.combat.apply_to(character.core_mut().combat_mut());
    Ok(character)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Empty string clears the value.
fn parse_optional<T>(value: String) -> Result<Option<T>, CharacterError>
where
    T: std::str::FromStr,
    CharacterError: From<T::Err>,
{
    match non_empty(Some(value)) {
        Some(v) => Ok(Some(v.parse()?)),
        None => Ok(None),
    }
}
