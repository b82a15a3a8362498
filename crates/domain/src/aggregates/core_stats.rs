//! The stat block shared by player characters and monsters.
//!
//! `Character` and `Monster` both embed a `CoreStats` rather than extending a
//! common base type. Everything the stat resolver needs that is not specific
//! to one of them lives here.

use serde::{Deserialize, Serialize};

use crate::game_systems::progression::{LevelChange, Progression};
use crate::value_objects::{
    Ability, AbilityScores, Alignment, CharacterName, CombatStats, Race, Size,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreStats {
    name: CharacterName,
    /// `None` for creatures without a playable race.
    race: Option<Race>,
    #[serde(default)]
    alignment: Alignment,
    #[serde(default)]
    size: Size,
    description: Option<String>,
    #[serde(default)]
    abilities: AbilityScores,
    #[serde(default)]
    combat: CombatStats,
    #[serde(default)]
    progression: Progression,
    image_path: Option<String>,
    icon_path: Option<String>,
}

impl CoreStats {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// New stat block with every ability at 10, default combat numbers and no experience.
    pub fn new(name: CharacterName) -> Self {
        Self {
            name,
            race: None,
            alignment: Alignment::default(),
            size: Size::default(),
            description: None,
            abilities: AbilityScores::default(),
            combat: CombatStats::default(),
            progression: Progression::default(),
            image_path: None,
            icon_path: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &CharacterName {
        &self.name
    }

    #[inline]
    pub fn race(&self) -> Option<Race> {
        self.race
    }

    #[inline]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[inline]
    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn ability_score(&self, ability: Ability) -> i32 {
        self.abilities.get(ability)
    }

    #[inline]
    pub fn combat(&self) -> &CombatStats {
        &self.combat
    }

    #[inline]
    pub fn progression(&self) -> Progression {
        self.progression
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.progression.level()
    }

    #[inline]
    pub fn experience(&self) -> u32 {
        self.progression.experience()
    }

    #[inline]
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    #[inline]
    pub fn icon_path(&self) -> Option<&str> {
        self.icon_path.as_deref()
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_race(mut self, race: Race) -> Self {
        self.race = Some(race);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_combat(mut self, combat: CombatStats) -> Self {
        self.combat = combat;
        self
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.progression = Progression::new(experience);
        self
    }

    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_icon_path(mut self, path: impl Into<String>) -> Self {
        self.icon_path = Some(path.into());
        self
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn set_name(&mut self, name: CharacterName) {
        self.name = name;
    }

    pub fn set_race(&mut self, race: Option<Race>) {
        self.race = race;
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn set_ability_score(&mut self, ability: Ability, score: i32) {
        self.abilities.set(ability, score);
    }

    /// Stored combat numbers. Nothing here is recomputed automatically.
    pub fn combat_mut(&mut self) -> &mut CombatStats {
        &mut self.combat
    }

    /// Replaces the experience total; the level follows.
    pub fn set_experience(&mut self, experience: u32) {
        self.progression.set_experience(experience);
    }

    pub fn award_experience(&mut self, amount: u32) -> LevelChange {
        self.progression.award(amount)
    }

    pub fn set_image_path(&mut self, path: Option<String>) {
        self.image_path = path;
    }

    pub fn set_icon_path(&mut self, path: Option<String>) {
        self.icon_path = path;
    }
}
