//! Skills and the fixed skill → ability table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ability::Ability;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

/// Ruleset table: every skill keys off exactly one ability.
pub const SKILL_ABILITIES: [(Skill, Ability); 18] = [
    (Skill::Acrobatics, Ability::Dexterity),
    (Skill::AnimalHandling, Ability::Wisdom),
    (Skill::Arcana, Ability::Intelligence),
    (Skill::Athletics, Ability::Strength),
    (Skill::Deception, Ability::Charisma),
    (Skill::History, Ability::Intelligence),
    (Skill::Insight, Ability::Wisdom),
    (Skill::Intimidation, Ability::Charisma),
    (Skill::Investigation, Ability::Intelligence),
    (Skill::Medicine, Ability::Wisdom),
    (Skill::Nature, Ability::Intelligence),
    (Skill::Perception, Ability::Wisdom),
    (Skill::Performance, Ability::Charisma),
    (Skill::Persuasion, Ability::Charisma),
    (Skill::Religion, Ability::Intelligence),
    (Skill::SleightOfHand, Ability::Dexterity),
    (Skill::Stealth, Ability::Dexterity),
    (Skill::Survival, Ability::Wisdom),
];

impl Skill {
    pub const ALL: [Skill; 18] = [
        Skill::Acrobatics,
        Skill::AnimalHandling,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Deception,
        Skill::History,
        Skill::Insight,
        Skill::Intimidation,
        Skill::Investigation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Perception,
        Skill::Performance,
        Skill::Persuasion,
        Skill::Religion,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Survival,
    ];

    /// The ability this skill is rolled with.
    pub fn ability(self) -> Ability {
        // SKILL_ABILITIES is declared in the same order as the enum.
        SKILL_ABILITIES[self as usize].1
    }

    /// Storage / wire key (`"sleight_of_hand"`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::AnimalHandling => "animal_handling",
            Skill::Arcana => "arcana",
            Skill::Athletics => "athletics",
            Skill::Deception => "deception",
            Skill::History => "history",
            Skill::Insight => "insight",
            Skill::Intimidation => "intimidation",
            Skill::Investigation => "investigation",
            Skill::Medicine => "medicine",
            Skill::Nature => "nature",
            Skill::Perception => "perception",
            Skill::Performance => "performance",
            Skill::Persuasion => "persuasion",
            Skill::Religion => "religion",
            Skill::SleightOfHand => "sleight_of_hand",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    /// Accepts `"sleight_of_hand"` or `"Sleight of Hand"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace(' ', "_");
        Skill::ALL
            .into_iter()
            .find(|skill| skill.key() == needle)
            .ok_or_else(|| DomainError::parse(format!("Unknown skill: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_enum_order() {
        for (i, (skill, _)) in SKILL_ABILITIES.iter().enumerate() {
            assert_eq!(*skill as usize, i);
            assert_eq!(Skill::ALL[i], *skill);
        }
    }

    #[test]
    fn known_mappings() {
        assert_eq!(Skill::Athletics.ability(), Ability::Strength);
        assert_eq!(Skill::Arcana.ability(), Ability::Intelligence);
        assert_eq!(Skill::Stealth.ability(), Ability::Dexterity);
        assert_eq!(Skill::Persuasion.ability(), Ability::Charisma);
        assert_eq!(Skill::Survival.ability(), Ability::Wisdom);
    }

    #[test]
    fn constitution_has_no_skills() {
        assert!(Skill::ALL
            .iter()
            .all(|s| s.ability() != Ability::Constitution));
    }

    #[test]
    fn parses_keys_and_display_names() {
        assert_eq!("sleight_of_hand".parse::<Skill>().unwrap(), Skill::SleightOfHand);
        assert_eq!("Animal Handling".parse::<Skill>().unwrap(), Skill::AnimalHandling);
        assert!("basket_weaving".parse::<Skill>().is_err());
    }

    #[test]
    fn serde_key_matches_storage_key() {
        for skill in Skill::ALL {
            let json = serde_json::to_string(&skill).unwrap();
            assert_eq!(json, format!("\"{}\"", skill.key()));
        }
    }
}
