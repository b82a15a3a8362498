//! Character aggregate - a player character owned by one user
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: All fields are encapsulated
//! - **Composition**: the stat block lives in an embedded [`CoreStats`]
//! - **Valid by construction**: `new()` takes pre-validated types
//! - **Builder pattern**: Fluent API for optional fields

use chrono::{DateTime, Utc};

use super::core_stats::CoreStats;
use crate::ids::CharacterId;
use crate::value_objects::{
    CharacterClass, CharacterName, SavingThrowProficiencies, SkillProficiencies,
};

/// A player character.
///
/// # Invariants
///
/// - `level` always matches the experience total (held by `Progression`)
/// - proficiency maps only ever contain keys from the closed ability/skill sets
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use herobook_domain::{Character, CharacterClass, CharacterName};
///
/// let name = CharacterName::new("Tordek").unwrap();
/// let character = Character::new(name, CharacterClass::Fighter, Utc::now());
///
/// assert_eq!(character.core().level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    id: CharacterId,
    core: CoreStats,
    class: CharacterClass,
    background: Option<String>,
    subclass: Option<String>,
    saving_throws: SavingThrowProficiencies,
    skills: SkillProficiencies,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Soft-delete marker carried for stored records.
    deleted_at: Option<DateTime<Utc>>,
    /// Number of successful writes. A save only lands if the stored record
    /// still carries the version this copy was loaded at.
    version: u64,
}

impl Character {
    // =========================================================================
    // Constructor
    // =========================================================================

    pub fn new(name: CharacterName, class: CharacterClass, now: DateTime<Utc>) -> Self {
        Self {
            id: CharacterId::new(),
            core: CoreStats::new(name),
            class,
            background: None,
            subclass: None,
            saving_throws: SavingThrowProficiencies::none(),
            skills: SkillProficiencies::none(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            version: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> CharacterId {
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
    pub fn name(&self) -> &CharacterName {
        self.core.name()
    }

    #[inline]
    pub fn class(&self) -> CharacterClass {
        self.class
    }

    #[inline]
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    #[inline]
    pub fn subclass(&self) -> Option<&str> {
        self.subclass.as_deref()
    }

    #[inline]
    pub fn saving_throws(&self) -> &SavingThrowProficiencies {
        &self.saving_throws
    }

    #[inline]
    pub fn skills(&self) -> &SkillProficiencies {
        &self.skills
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[inline]
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_core(mut self, core: CoreStats) -> Self {
        self.core = core;
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn with_subclass(mut self, subclass: impl Into<String>) -> Self {
        self.subclass = Some(subclass.into());
        self
    }

    pub fn with_saving_throws(mut self, saving_throws: SavingThrowProficiencies) -> Self {
        self.saving_throws = saving_throws;
        self
    }

    pub fn with_skills(mut self, skills: SkillProficiencies) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn with_deleted_at(mut self, deleted_at: Option<DateTime<Utc>>) -> Self {
        self.deleted_at = deleted_at;
        self
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn set_class(&mut self, class: CharacterClass) {
        self.class = class;
    }

    pub fn set_background(&mut self, background: Option<String>) {
        self.background = background;
    }

    pub fn set_subclass(&mut self, subclass: Option<String>) {
        self.subclass = subclass;
    }

    pub fn saving_throws_mut(&mut self) -> &mut SavingThrowProficiencies {
        &mut self.saving_throws
    }

    pub fn skills_mut(&mut self) -> &mut SkillProficiencies {
        &mut self.skills
    }

    /// Stamp the last-modified time.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Record that this copy has been written.
    pub fn advance_version(&mut self) {
        self.version += 1;
    }
}
