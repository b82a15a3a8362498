//! Monster aggregate - an unowned stat block with an award value.

use chrono::{DateTime, Utc};

use super::core_stats::CoreStats;
use crate::error::DomainError;
use crate::ids::MonsterId;
use crate::value_objects::{CharacterName, MonsterType};

#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    id: MonsterId,
    core: CoreStats,
    monster_type: MonsterType,
    challenge_rating: f64,
    /// Experience awarded for defeating this monster.
    experience_points: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Challenge ratings are finite and non-negative (`0.125`, `0.25`, `0.5`, `1`..`30`).
pub fn validate_challenge_rating(rating: f64) -> Result<(), DomainError> {
    if rating.is_finite() && rating >= 0.0 {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "challenge_rating must be a non-negative number, got {}",
            rating
        )))
    }
}

impl Monster {
    pub fn new(name: CharacterName, monster_type: MonsterType, now: DateTime<Utc>) -> Self {
        Self {
            id: MonsterId::new(),
            core: CoreStats::new(name),
            monster_type,
            challenge_rating: 0.0,
            experience_points: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn id(&self) -> MonsterId {
        self.id
    }

    #[inline]
    pub fn core(&self) -> &CoreStats {
        &self.core
    }

    #[inline]
    pub fn core_mut(&mut self) -> &mut CoreStats {
        &mut self.core
    }

    #[inline]
    pub fn monster_type(&self) -> MonsterType {
        self.monster_type
    }

    #[inline]
    pub fn challenge_rating(&self) -> f64 {
        self.challenge_rating
    }

    #[inline]
    pub fn experience_points(&self) -> u32 {
        self.experience_points
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn with_id(mut self, id: MonsterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_core(mut self, core: CoreStats) -> Self {
        self.core = core;
        self
    }

    pub fn with_challenge_rating(mut self, rating: f64) -> Result<Self, DomainError> {
        self.set_challenge_rating(rating)?;
        Ok(self)
    }

    pub fn with_experience_points(mut self, xp: u32) -> Self {
        self.experience_points = xp;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn set_monster_type(&mut self, monster_type: MonsterType) {
        self.monster_type = monster_type;
    }

    pub fn set_challenge_rating(&mut self, rating: f64) -> Result<(), DomainError> {
        validate_challenge_rating(rating)?;
        self.challenge_rating = rating;
        Ok(())
    }

    pub fn set_experience_points(&mut self, xp: u32) {
        self.experience_points = xp;
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> Monster {
        Monster::new(
            CharacterName::new("Goblin").unwrap(),
            MonsterType::Humanoid,
            Utc::now(),
        )
    }

    #[test]
    fn challenge_rating_must_be_non_negative() {
        assert!(goblin().with_challenge_rating(0.25).is_ok());
        assert!(goblin().with_challenge_rating(-1.0).is_err());
        assert!(goblin().with_challenge_rating(f64::NAN).is_err());
    }

    #[test]
    fn rejected_rating_leaves_value_unchanged() {
        let mut monster = goblin().with_challenge_rating(2.0).unwrap();
        assert!(monster.set_challenge_rating(f64::INFINITY).is_err());
        assert_eq!(monster.challenge_rating(), 2.0);
    }

    #[test]
    fn monsters_share_the_core_stat_block() {
        let monster = goblin().with_experience_points(50);
        assert_eq!(monster.core().level(), 1);
        assert_eq!(monster.experience_points(), 50);
    }
}
