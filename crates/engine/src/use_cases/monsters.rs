//! Monster management use cases.
//!
//! Monsters have no owner; any authenticated caller may manage them.

use std::collections::BTreeMap;
use std::sync::Arc;

use herobook_domain::{
    compute_core_stats, Alignment, CharacterName, CombatOverrides, CoreDerivedStats, CoreStats,
    DomainError, Monster, MonsterId, MonsterType, Race, Size, StatPatch,
};

use crate::infrastructure::ports::{ClockPort, MonsterRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum MonsterError {
    #[error("Monster not found: {0}")]
    NotFound(MonsterId),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl From<DomainError> for MonsterError {
    fn from(err: DomainError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewMonster {
    pub name: String,
    pub monster_type: String,
    pub race: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub abilities: BTreeMap<String, i32>,
    pub challenge_rating: f64,
    pub experience_points: u32,
    pub combat: CombatOverrides,
}

/// Partial update. `None` and empty maps leave the stored value alone.
#[derive(Debug, Clone, Default)]
pub struct MonsterUpdate {
    pub name: Option<String>,
    pub monster_type: Option<String>,
    pub alignment: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub abilities: BTreeMap<String, i32>,
    pub challenge_rating: Option<f64>,
    pub experience_points: Option<u32>,
    pub combat: CombatOverrides,
}

pub struct MonsterManagement {
    monsters: Arc<dyn MonsterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl MonsterManagement {
    pub fn new(monsters: Arc<dyn MonsterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { monsters, clock }
    }

    pub async fn create(&self, input: NewMonster) -> Result<Monster, MonsterError> {
        input.combat.validate()?;
        let name = CharacterName::new(input.name)?;
        let monster_type: MonsterType = input.monster_type.parse()?;
        let patch = ability_patch(input.abilities)?;

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
        if let Some(description) = input.description.filter(|d| !d.trim().is_empty()) {
            core = core.with_description(description);
        }
        for (ability, score) in &patch.abilities {
            core.set_ability_score(*ability, *score);
        }
        input.combat.apply_to(core.combat_mut());

        let monster = Monster::new(name, monster_type, self.clock.now())
            .with_core(core)
            .with_challenge_rating(input.challenge_rating)?
            .with_experience_points(input.experience_points);

        self.monsters.create(&monster).await?;
        tracing::info!(monster_id = %monster.id(), "Created monster");
        Ok(monster)
    }

    pub async fn get(&self, id: MonsterId) -> Result<Monster, MonsterError> {
        self.monsters
            .get(id)
            .await?
            .ok_or(MonsterError::NotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<Monster>, MonsterError> {
        Ok(self.monsters.list().await?)
    }

    pub async fn update(
        &self,
        id: MonsterId,
        update: MonsterUpdate,
    ) -> Result<Monster, MonsterError> {
        update.combat.validate()?;
        let patch = ability_patch(update.abilities)?;
        let mut monster = self.get(id).await?;

        if let Some(name) = update.name {
            monster.core_mut().set_name(CharacterName::new(name)?);
        }
        if let Some(monster_type) = update.monster_type {
            monster.set_monster_type(monster_type.parse()?);
        }
        if let Some(alignment) = update.alignment {
            monster.core_mut().set_alignment(alignment.parse()?);
        }
        if let Some(size) = update.size {
            monster.core_mut().set_size(size.parse()?);
        }
        if let Some(description) = update.description {
            let description = Some(description).filter(|d| !d.trim().is_empty());
            monster.core_mut().set_description(description);
        }
        if let Some(rating) = update.challenge_rating {
            monster.set_challenge_rating(rating)?;
        }
        if let Some(xp) = update.experience_points {
            monster.set_experience_points(xp);
        }
        for (ability, score) in &patch.abilities {
            monster.core_mut().set_ability_score(*ability, *score);
        }
        update.combat.apply_to(monster.core_mut().combat_mut());

        monster.touch(self.clock.now());
        self.monsters.update(&monster).await.map_err(|e| match e {
            RepoError::NotFound { .. } => MonsterError::NotFound(id),
            other => MonsterError::Repo(other),
        })?;
        Ok(monster)
    }

    pub async fn delete(&self, id: MonsterId) -> Result<(), MonsterError> {
        if self.monsters.delete(id).await? {
            tracing::info!(monster_id = %id, "Deleted monster");
            Ok(())
        } else {
            Err(MonsterError::NotFound(id))
        }
    }

    pub async fn stats(&self, id: MonsterId) -> Result<CoreDerivedStats, MonsterError> {
        let monster = self.get(id).await?;
        Ok(compute_core_stats(monster.core()))
    }
}

/// Ability scores only; monsters carry no proficiency flags.
fn ability_patch(abilities: BTreeMap<String, i32>) -> Result<StatPatch, DomainError> {
    StatPatch::from_raw(abilities, Vec::new(), Vec::new())
}
