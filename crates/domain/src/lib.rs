//! Herobook domain: character rules, value objects and aggregates.
//!
//! No I/O lives here. The engine crate supplies persistence, ownership checks
//! and the HTTP surface.

pub mod aggregates;
pub mod error;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use aggregates::{validate_challenge_rating, Character, CoreStats, Monster, User};

pub use error::DomainError;

// Re-export the rules engine
pub use game_systems::{
    ability_modifier, apply_stat_patch, compute_core_stats, compute_derived_stats,
    experience_to_next_level, hit_die, initialize_combat_stats, level_for_experience,
    proficiency_bonus, threshold_for_level, CoreDerivedStats, DerivedStats, LevelChange,
    Progression, SavingThrowBonus, SkillBonus, StatPatch, MAX_LEVEL, XP_THRESHOLDS,
};

// Re-export ID types
pub use ids::{CharacterId, MonsterId, UserId};

pub use value_objects::{
    Ability, AbilityScores, Alignment, CharacterClass, CharacterName, CombatOverrides,
    CombatStats, ContentName, Email, MonsterType, Race, SavingThrowProficiencies, Size, Skill,
    SkillProficiencies, Username, SKILL_ABILITIES,
};
