//! Score → modifier, level → proficiency bonus, class → hit die.

use crate::value_objects::CharacterClass;

/// `floor((score - 10) / 2)`, rounding toward negative infinity so 9 → -1.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// `2 + floor((level - 1) / 4)`; levels outside 1..=20 are clamped first.
pub fn proficiency_bonus(level: u8) -> i32 {
    let level = i32::from(level.clamp(1, 20));
    2 + (level - 1) / 4
}

pub fn hit_die(class: CharacterClass) -> u8 {
    match class {
        CharacterClass::Barbarian => 12,
        CharacterClass::Fighter | CharacterClass::Paladin | CharacterClass::Ranger => 10,
        CharacterClass::Bard
        | CharacterClass::Cleric
        | CharacterClass::Druid
        | CharacterClass::Monk
        | CharacterClass::Rogue
        | CharacterClass::Warlock => 8,
        CharacterClass::Sorcerer | CharacterClass::Wizard => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_spot_values() {
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(8), -1);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(20), 5);
        assert_eq!(ability_modifier(30), 10);
    }

    #[test]
    fn modifier_floors_over_full_range() {
        for score in 1..=30 {
            let expected = ((score - 10) as f64 / 2.0).floor() as i32;
            assert_eq!(ability_modifier(score), expected, "score {}", score);
        }
    }

    #[test]
    fn modifier_is_not_clamped() {
        assert_eq!(ability_modifier(0), -5);
        assert_eq!(ability_modifier(40), 15);
    }

    #[test]
    fn proficiency_bonus_progression() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
        for level in 1..=20u8 {
            assert_eq!(proficiency_bonus(level), 2 + (i32::from(level) - 1) / 4);
        }
    }

    #[test]
    fn proficiency_bonus_clamps_out_of_range_levels() {
        assert_eq!(proficiency_bonus(0), 2);
        assert_eq!(proficiency_bonus(25), 6);
    }

    #[test]
    fn hit_dice_by_class() {
        assert_eq!(hit_die(CharacterClass::Barbarian), 12);
        assert_eq!(hit_die(CharacterClass::Fighter), 10);
        assert_eq!(hit_die(CharacterClass::Rogue), 8);
        assert_eq!(hit_die(CharacterClass::Wizard), 6);
    }
}
