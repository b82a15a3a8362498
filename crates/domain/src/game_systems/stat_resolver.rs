//! Derived stats, combat-stat initialization and stat patches.
//!
//! Everything here is pure: values in, values out. Persistence is the
//! caller's concern.
//!
//! Combat numbers (AC, HP, initiative) are derived from ability scores only by
//! [`initialize_combat_stats`]. Reads report whatever is stored, so a manual
//! override survives later ability edits until recomputation is requested.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ability_math::{ability_modifier, hit_die, proficiency_bonus};
use crate::aggregates::{Character, CoreStats};
use crate::error::DomainError;
use crate::value_objects::{
    validate_ability_score, Ability, CombatStats, Skill, SKILL_ABILITIES,
};

/// Unarmored armor class before the dexterity modifier.
const UNARMORED_BASE_AC: i32 = 10;
const PASSIVE_BASE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrowBonus {
    pub proficient: bool,
    pub modifier: i32,
    pub total_bonus: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillBonus {
    pub ability: Ability,
    pub proficient: bool,
    pub modifier: i32,
    pub total_bonus: i32,
}

/// Numbers derivable from a bare stat block. Used directly for monsters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreDerivedStats {
    pub ability_modifiers: BTreeMap<Ability, i32>,
    pub proficiency_bonus: i32,
    pub level: u8,
    pub experience: u32,
    pub experience_to_next_level: u32,
    #[serde(flatten)]
    pub combat: CombatStats,
}

impl CoreDerivedStats {
    pub fn modifier(&self, ability: Ability) -> i32 {
        self.ability_modifiers.get(&ability).copied().unwrap_or(0)
    }
}

/// Everything a character sheet displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    #[serde(flatten)]
    pub core: CoreDerivedStats,
    pub saving_throws: BTreeMap<Ability, SavingThrowBonus>,
    pub skills: BTreeMap<Skill, SkillBonus>,
    pub passive_perception: i32,
}

impl DerivedStats {
    pub fn saving_throw(&self, ability: Ability) -> Option<&SavingThrowBonus> {
        self.saving_throws.get(&ability)
    }

    pub fn skill(&self, skill: Skill) -> Option<&SkillBonus> {
        self.skills.get(&skill)
    }
}

pub fn compute_core_stats(core: &CoreStats) -> CoreDerivedStats {
    let progression = core.progression();
    CoreDerivedStats {
        ability_modifiers: core
            .abilities()
            .iter()
            .map(|(ability, score)| (ability, ability_modifier(score)))
            .collect(),
        proficiency_bonus: proficiency_bonus(progression.level()),
        level: progression.level(),
        experience: progression.experience(),
        experience_to_next_level: progression.experience_to_next_level(),
        combat: core.combat().clone(),
    }
}

pub fn compute_derived_stats(character: &Character) -> DerivedStats {
    let core = compute_core_stats(character.core());
    let prof = core.proficiency_bonus;
    let with_prof = |modifier: i32, proficient: bool| {
        if proficient {
            modifier + prof
        } else {
            modifier
        }
    };

    let saving_throws = character
        .saving_throws()
        .iter()
        .map(|(ability, proficient)| {
            let modifier = core.modifier(ability);
            (
                ability,
                SavingThrowBonus {
                    proficient,
                    modifier,
                    total_bonus: with_prof(modifier, proficient),
                },
            )
        })
        .collect();

    let skills: BTreeMap<Skill, SkillBonus> = SKILL_ABILITIES
        .iter()
        .map(|&(skill, ability)| {
            let proficient = character.skills().is_proficient(skill);
            let modifier = core.modifier(ability);
            (
                skill,
                SkillBonus {
                    ability,
                    proficient,
                    modifier,
                    total_bonus: with_prof(modifier, proficient),
                },
            )
        })
        .collect();

    let perception = skills
        .get(&Skill::Perception)
        .map(|s| s.total_bonus)
        .unwrap_or_else(|| core.modifier(Ability::Wisdom));

    DerivedStats {
        core,
        saving_throws,
        skills,
        passive_perception: PASSIVE_BASE + perception,
    }
}

/// First-level combat numbers from class and ability scores.
///
/// Max HP is the class hit die plus the constitution modifier, current HP is
/// reset to max, initiative is the dexterity modifier and AC is unarmored.
pub fn initialize_combat_stats(mut character: Character) -> Character {
    let die = hit_die(character.class());
    let abilities = *character.core().abilities();
    let con_mod = ability_modifier(abilities.constitution);
    let dex_mod = ability_modifier(abilities.dexterity);

    let combat = character.core_mut().combat_mut();
    combat.hit_points = i32::from(die) + con_mod;
    combat.current_hit_points = combat.hit_points;
    combat.initiative = dex_mod;
    combat.armor_class = UNARMORED_BASE_AC + dex_mod;
    combat.hit_dice = format!("1d{}", die);
    character
}

/// A typed subset of ability scores and proficiency flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPatch {
    #[serde(default)]
    pub abilities: BTreeMap<Ability, i32>,
    #[serde(default)]
    pub saving_throws: BTreeMap<Ability, bool>,
    #[serde(default)]
    pub skills: BTreeMap<Skill, bool>,
}

impl StatPatch {
    /// Converts string-keyed input maps, rejecting unknown keys and scores outside 1..=30.
    pub fn from_raw<A, S, K>(abilities: A, saving_throws: S, skills: K) -> Result<Self, DomainError>
    where
        A: IntoIterator<Item = (String, i32)>,
        S: IntoIterator<Item = (String, bool)>,
        K: IntoIterator<Item = (String, bool)>,
    {
        let mut patch = StatPatch::default();
        for (key, score) in abilities {
            let ability = parse_key::<Ability>(&key, "ability")?;
            validate_ability_score(ability, score)?;
            patch.abilities.insert(ability, score);
        }
        for (key, flag) in saving_throws {
            patch
                .saving_throws
                .insert(parse_key::<Ability>(&key, "saving throw")?, flag);
        }
        for (key, flag) in skills {
            patch.skills.insert(parse_key::<Skill>(&key, "skill")?, flag);
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty() && self.saving_throws.is_empty() && self.skills.is_empty()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.abilities
            .iter()
            .try_for_each(|(ability, score)| validate_ability_score(*ability, *score))
    }
}

fn parse_key<T: std::str::FromStr>(key: &str, what: &str) -> Result<T, DomainError> {
    key.parse::<T>()
        .map_err(|_| DomainError::validation(format!("Unknown {} key: {}", what, key)))
}

/// Merge a patch; fields the patch does not mention are left as they are.
///
/// Combat numbers are not touched even when dexterity or constitution change.
pub fn apply_stat_patch(mut character: Character, patch: &StatPatch) -> Character {
    for (ability, score) in &patch.abilities {
        character.core_mut().set_ability_score(*ability, *score);
    }
    for (ability, flag) in &patch.saving_throws {
        character.saving_throws_mut().set(*ability, *flag);
    }
    for (skill, flag) in &patch.skills {
        character.skills_mut().set(*skill, *flag);
    }
    character
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::value_objects::{
        AbilityScores, CharacterClass, CharacterName, SavingThrowProficiencies,
        SkillProficiencies,
    };

    fn scenario_character() -> Character {
        let name = CharacterName::new("Regdar").unwrap();
        let abilities = AbilityScores::default()
            .with(Ability::Strength, 14)
            .with(Ability::Dexterity, 16)
            .with(Ability::Constitution, 12);
        let character = Character::new(name.clone(), CharacterClass::Fighter, Utc::now())
            .with_core(CoreStats::new(name).with_abilities(abilities));
        initialize_combat_stats(character)
    }

    #[test]
    fn creation_scenario() {
        let character = scenario_character();
        let stats = compute_derived_stats(&character);

        assert_eq!(stats.core.modifier(Ability::Strength), 2);
        assert_eq!(stats.core.modifier(Ability::Dexterity), 3);
        assert_eq!(stats.core.modifier(Ability::Constitution), 1);
        assert_eq!(stats.core.level, 1);
        assert_eq!(stats.core.proficiency_bonus, 2);
        assert_eq!(stats.core.combat.initiative, 3);

        for (ability, save) in &stats.saving_throws {
            assert!(!save.proficient);
            assert_eq!(save.total_bonus, stats.core.modifier(*ability));
        }
        for skill in stats.skills.values() {
            assert_eq!(skill.total_bonus, stats.core.modifier(skill.ability));
        }
    }

    #[test]
    fn level_five_scenario() {
        let proficient = SkillProficiencies::none()
            .with(Skill::Athletics, true)
            .with(Skill::Perception, true);
        let mut character = scenario_character()
            .with_saving_throws(SavingThrowProficiencies::none().with(Ability::Strength, true))
            .with_skills(proficient);
        let before = compute_derived_stats(&character);

        character.core_mut().set_experience(6500);
        let after = compute_derived_stats(&character);

        assert_eq!(after.core.level, 5);
        assert_eq!(after.core.proficiency_bonus, 3);
        let shift = |s: Skill| {
            after.skill(s).unwrap().total_bonus - before.skill(s).unwrap().total_bonus
        };
        assert_eq!(shift(Skill::Athletics), 1);
        assert_eq!(shift(Skill::Perception), 1);
        assert_eq!(shift(Skill::Stealth), 0);
        assert_eq!(
            after.saving_throw(Ability::Strength).unwrap().total_bonus,
            before.saving_throw(Ability::Strength).unwrap().total_bonus + 1
        );
    }

    #[test]
    fn saving_throws_add_proficiency_only_when_proficient() {
        let character = scenario_character()
            .with_saving_throws(SavingThrowProficiencies::none().with(Ability::Dexterity, true));
        let stats = compute_derived_stats(&character);
        let dex = stats.saving_throw(Ability::Dexterity).unwrap();
        assert!(dex.proficient);
        assert_eq!(dex.total_bonus, dex.modifier + stats.core.proficiency_bonus);
        let con = stats.saving_throw(Ability::Constitution).unwrap();
        assert_eq!(con.total_bonus, con.modifier);
    }

    #[test]
    fn every_skill_follows_its_ability() {
        let all = Skill::ALL
            .iter()
            .fold(SkillProficiencies::none(), |acc, s| acc.with(*s, true));
        let character = scenario_character().with_skills(all);
        let stats = compute_derived_stats(&character);

        assert_eq!(stats.skills.len(), 18);
        for (skill, ability) in SKILL_ABILITIES {
            let bonus = stats.skill(skill).unwrap();
            assert_eq!(bonus.ability, ability);
            assert_eq!(
                bonus.total_bonus,
                stats.core.modifier(ability) + stats.core.proficiency_bonus
            );
        }
    }

    #[test]
    fn passive_perception_uses_perception_total() {
        let character = scenario_character()
            .with_skills(SkillProficiencies::none().with(Skill::Perception, true));
        let stats = compute_derived_stats(&character);
        // wisdom 10 → +0, proficient at level 1 → +2
        assert_eq!(stats.passive_perception, 12);
    }

    #[test]
    fn initialize_combat_stats_from_class_and_abilities() {
        let character = scenario_character();
        let combat = character.core().combat();
        assert_eq!(combat.hit_points, 11);
        assert_eq!(combat.current_hit_points, 11);
        assert_eq!(combat.armor_class, 13);
        assert_eq!(combat.initiative, 3);
        assert_eq!(combat.hit_dice, "1d10");
    }

    #[test]
    fn reads_do_not_recompute_combat() {
        let mut character = scenario_character();
        character.core_mut().combat_mut().armor_class = 18;
        character.core_mut().set_ability_score(Ability::Dexterity, 8);
        let stats = compute_derived_stats(&character);
        assert_eq!(stats.core.combat.armor_class, 18);
        assert_eq!(stats.core.combat.initiative, 3);
    }

    #[test]
    fn patch_leaves_unspecified_fields() {
        let character = scenario_character();
        let patch = StatPatch::from_raw(
            vec![("wisdom".to_string(), 15)],
            vec![("charisma".to_string(), true)],
            vec![("sleight_of_hand".to_string(), true)],
        )
        .unwrap();
        let patched = apply_stat_patch(character.clone(), &patch);

        assert_eq!(patched.core().ability_score(Ability::Wisdom), 15);
        assert_eq!(patched.core().ability_score(Ability::Strength), 14);
        assert!(patched.saving_throws().is_proficient(Ability::Charisma));
        assert!(patched.skills().is_proficient(Skill::SleightOfHand));
        assert_eq!(patched.core().combat(), character.core().combat());
    }

    #[test]
    fn patch_rejects_unknown_keys_and_out_of_range_scores() {
        let empty = Vec::<(String, bool)>::new;
        let unknown = StatPatch::from_raw(vec![("luck".to_string(), 12)], empty(), empty());
        assert!(matches!(unknown, Err(DomainError::Validation(_))));

        let out_of_range =
            StatPatch::from_raw(vec![("strength".to_string(), 31)], empty(), empty());
        assert!(matches!(out_of_range, Err(DomainError::Validation(_))));

        let bad_skill = StatPatch::from_raw(
            Vec::<(String, i32)>::new(),
            empty(),
            vec![("juggling".to_string(), true)],
        );
        assert!(matches!(bad_skill, Err(DomainError::Validation(_))));
    }

    #[test]
    fn computation_accepts_scores_outside_validation_range() {
        let mut character = scenario_character();
        character.core_mut().set_ability_score(Ability::Strength, 35);
        let stats = compute_derived_stats(&character);
        assert_eq!(stats.core.modifier(Ability::Strength), 12);
    }

    #[test]
    fn derived_stats_serialize_with_flat_core_fields() {
        let stats = compute_derived_stats(&scenario_character());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["proficiency_bonus"], 2);
        assert_eq!(json["ability_modifiers"]["dexterity"], 3);
        assert_eq!(json["skills"]["athletics"]["ability"], "strength");
        assert_eq!(json["armor_class"], 13);
    }
}
