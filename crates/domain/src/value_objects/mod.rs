//! Value objects - Immutable objects defined by their attributes

mod ability;
mod combat;
mod descriptors;
mod names;
mod proficiency;
mod skill;

pub use ability::{
    validate_ability_score, Ability, AbilityScores, DEFAULT_ABILITY_SCORE, MAX_ABILITY_SCORE,
    MIN_ABILITY_SCORE,
};
pub use combat::{
    validate_hit_dice, CombatOverrides, CombatStats, DEFAULT_ARMOR_CLASS, DEFAULT_HIT_DICE,
    DEFAULT_SPEED,
};
pub use descriptors::{Alignment, CharacterClass, MonsterType, Race, Size};
pub use names::{CharacterName, ContentName, Email, Username};
pub use proficiency::{
    Proficiencies, ProficiencyKey, SavingThrowProficiencies, SkillProficiencies,
};
pub use skill::{Skill, SKILL_ABILITIES};
