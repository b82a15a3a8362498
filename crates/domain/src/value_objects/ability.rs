//! The six ability scores and their closed key set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lowest ability score accepted at the validation boundary.
pub const MIN_ABILITY_SCORE: i32 = 1;
/// Highest ability score accepted at the validation boundary.
pub const MAX_ABILITY_SCORE: i32 = 30;
/// Score assigned to every ability when none is supplied.
pub const DEFAULT_ABILITY_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    /// Storage / wire key (`"strength"`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    /// Accepts the storage key, the capitalized name, or the three-letter abbreviation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Ability::ALL
            .into_iter()
            .find(|a| a.key() == needle || a.abbreviation().eq_ignore_ascii_case(&needle))
            .ok_or_else(|| DomainError::parse(format!("Unknown ability: {}", s)))
    }
}

/// Raw ability scores.
///
/// Computation never clamps these; range checks belong to [`validate_ability_score`]
/// at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(default = "default_score")]
    pub strength: i32,
    #[serde(default = "default_score")]
    pub dexterity: i32,
    #[serde(default = "default_score")]
    pub constitution: i32,
    #[serde(default = "default_score")]
    pub intelligence: i32,
    #[serde(default = "default_score")]
    pub wisdom: i32,
    #[serde(default = "default_score")]
    pub charisma: i32,
}

fn default_score() -> i32 {
    DEFAULT_ABILITY_SCORE
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: DEFAULT_ABILITY_SCORE,
            dexterity: DEFAULT_ABILITY_SCORE,
            constitution: DEFAULT_ABILITY_SCORE,
            intelligence: DEFAULT_ABILITY_SCORE,
            wisdom: DEFAULT_ABILITY_SCORE,
            charisma: DEFAULT_ABILITY_SCORE,
        }
    }
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, ability: Ability, score: i32) -> Self {
        self.set(ability, score);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    /// Checks every score against the 1..=30 boundary.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.iter()
            .try_for_each(|(ability, score)| validate_ability_score(ability, score))
    }
}

/// Boundary check for a single score.
pub fn validate_ability_score(ability: Ability, score: i32) -> Result<(), DomainError> {
    if (MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "{} must be between {} and {}, got {}",
            ability, MIN_ABILITY_SCORE, MAX_ABILITY_SCORE, score
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_names_and_abbreviations() {
        assert_eq!("strength".parse::<Ability>().unwrap(), Ability::Strength);
        assert_eq!("Wisdom".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert_eq!("cha".parse::<Ability>().unwrap(), Ability::Charisma);
        assert!("luck".parse::<Ability>().is_err());
    }

    #[test]
    fn defaults_to_ten() {
        let scores = AbilityScores::default();
        assert!(scores.iter().all(|(_, s)| s == 10));
    }

    #[test]
    fn missing_scores_deserialize_to_default() {
        let scores: AbilityScores = serde_json::from_str(r#"{"strength": 14}"#).unwrap();
        assert_eq!(scores.strength, 14);
        assert_eq!(scores.charisma, 10);
    }

    #[test]
    fn validation_is_a_boundary_concern() {
        let scores = AbilityScores::default().with(Ability::Dexterity, 31);
        assert_eq!(scores.get(Ability::Dexterity), 31);
        assert!(scores.validate().is_err());
        assert!(validate_ability_score(Ability::Wisdom, 1).is_ok());
        assert!(validate_ability_score(Ability::Wisdom, 0).is_err());
    }
}
