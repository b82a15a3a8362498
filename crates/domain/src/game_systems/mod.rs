//! Rules engine: ability math, the progression table and the stat resolver.
//!
//! All functions here are pure and synchronous.

pub mod ability_math;
pub mod progression;
pub mod stat_resolver;

pub use ability_math::{ability_modifier, hit_die, proficiency_bonus};
pub use progression::{
    experience_to_next_level, level_for_experience, threshold_for_level, LevelChange,
    Progression, MAX_LEVEL, XP_THRESHOLDS,
};
pub use stat_resolver::{
    apply_stat_patch, compute_core_stats, compute_derived_stats, initialize_combat_stats,
    CoreDerivedStats, DerivedStats, SavingThrowBonus, SkillBonus, StatPatch,
};
