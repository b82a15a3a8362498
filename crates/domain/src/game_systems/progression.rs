//! Experience ↔ level table and the stored progression pair.

use serde::{Deserialize, Serialize};

pub const MAX_LEVEL: u8 = 20;

/// Minimum experience for each level. Index is level - 1.
pub const XP_THRESHOLDS: [u32; 20] = [
    0,      // Level 1
    300,    // Level 2
    900,    // Level 3
    2700,   // Level 4
    6500,   // Level 5
    14000,  // Level 6
    23000,  // Level 7
    34000,  // Level 8
    48000,  // Level 9
    64000,  // Level 10
    85000,  // Level 11
    100000, // Level 12
    120000, // Level 13
    140000, // Level 14
    165000, // Level 15
    195000, // Level 16
    225000, // Level 17
    265000, // Level 18
    305000, // Level 19
    355000, // Level 20
];

/// Greatest level whose threshold is `<= xp`. Thresholds are inclusive.
pub fn level_for_experience(xp: u32) -> u8 {
    let reached = XP_THRESHOLDS.iter().take_while(|t| **t <= xp).count();
    // XP_THRESHOLDS[0] is 0, so at least one level is always reached.
    reached.max(1) as u8
}

/// Minimum experience for `level`: 0 at or below 0, capped at level 20.
pub fn threshold_for_level(level: i32) -> u32 {
    if level <= 0 {
        return 0;
    }
    let index = (level.min(i32::from(MAX_LEVEL)) - 1) as usize;
    XP_THRESHOLDS[index]
}

/// Experience still needed for the next level; 0 at level 20.
pub fn experience_to_next_level(xp: u32) -> u32 {
    let level = level_for_experience(xp);
    if level >= MAX_LEVEL {
        return 0;
    }
    threshold_for_level(i32::from(level) + 1).saturating_sub(xp)
}

/// Outcome of adding experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChange {
    pub previous_level: u8,
    pub new_level: u8,
    pub leveled_up: bool,
}

/// Experience total plus the level derived from it.
///
/// The level is never set independently, so the pair cannot disagree once
/// constructed. Stored records that disagree go through [`Progression::from_stored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredProgression")]
pub struct Progression {
    experience: u32,
    level: u8,
}

#[derive(Deserialize)]
struct StoredProgression {
    #[serde(default)]
    experience: Option<i64>,
    #[serde(default)]
    level: Option<i64>,
}

impl From<StoredProgression> for Progression {
    fn from(stored: StoredProgression) -> Self {
        Progression::from_stored(stored.experience, stored.level).0
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Progression {
    pub fn new(experience: u32) -> Self {
        Self {
            experience,
            level: level_for_experience(experience),
        }
    }

    /// Normalize a persisted pair.
    ///
    /// Missing or negative experience reads as 0. The derived level replaces a
    /// missing or disagreeing stored level; the returned flag is `true` when the
    /// stored level was stale so the next write resynchronizes it.
    pub fn from_stored(experience: Option<i64>, level: Option<i64>) -> (Self, bool) {
        let experience = experience
            .map(|xp| u32::try_from(xp.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0);
        let progression = Self::new(experience);
        let stale = level != Some(i64::from(progression.level));
        (progression, stale)
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn proficiency_bonus(&self) -> i32 {
        super::ability_math::proficiency_bonus(self.level)
    }

    pub fn experience_to_next_level(&self) -> u32 {
        experience_to_next_level(self.experience)
    }

    pub fn set_experience(&mut self, experience: u32) {
        *self = Self::new(experience);
    }

    /// Adds experience (saturating at `u32::MAX`) and reports the level change.
    pub fn award(&mut self, amount: u32) -> LevelChange {
        let previous_level = self.level;
        self.set_experience(self.experience.saturating_add(amount));
        LevelChange {
            previous_level,
            new_level: self.level,
            leveled_up: self.level > previous_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for_experience(0), 1);
        assert_eq!(level_for_experience(299), 1);
        assert_eq!(level_for_experience(300), 2);
        assert_eq!(level_for_experience(6499), 4);
        assert_eq!(level_for_experience(6500), 5);
        assert_eq!(level_for_experience(13999), 5);
        assert_eq!(level_for_experience(355000), 20);
        assert_eq!(level_for_experience(999999), 20);
        assert_eq!(level_for_experience(u32::MAX), 20);
    }

    #[test]
    fn level_is_monotonic() {
        let mut previous = 1;
        for xp in (0..=400_000).step_by(250) {
            let level = level_for_experience(xp);
            assert!(level >= previous, "xp {}", xp);
            previous = level;
        }
    }

    #[test]
    fn thresholds_round_trip() {
        for level in 1..=20 {
            assert_eq!(level_for_experience(threshold_for_level(level)), level as u8);
        }
    }

    #[test]
    fn threshold_edges() {
        assert_eq!(threshold_for_level(0), 0);
        assert_eq!(threshold_for_level(-3), 0);
        assert_eq!(threshold_for_level(1), 0);
        assert_eq!(threshold_for_level(5), 6500);
        assert_eq!(threshold_for_level(21), 355000);
    }

    #[test]
    fn experience_to_next() {
        assert_eq!(experience_to_next_level(0), 300);
        assert_eq!(experience_to_next_level(6500), 7500);
        assert_eq!(experience_to_next_level(354_999), 1);
        assert_eq!(experience_to_next_level(355_000), 0);
        assert_eq!(experience_to_next_level(1_000_000), 0);
    }

    #[test]
    fn legacy_record_without_experience() {
        let (progression, stale) = Progression::from_stored(None, None);
        assert_eq!(progression.experience(), 0);
        assert_eq!(progression.level(), 1);
        assert!(stale);
    }

    #[test]
    fn stale_stored_level_is_replaced() {
        let (progression, stale) = Progression::from_stored(Some(6500), Some(3));
        assert_eq!(progression.level(), 5);
        assert!(stale);

        let (_, stale) = Progression::from_stored(Some(6500), Some(5));
        assert!(!stale);
    }

    #[test]
    fn negative_experience_reads_as_zero() {
        let (progression, _) = Progression::from_stored(Some(-40), Some(1));
        assert_eq!(progression.experience(), 0);
    }

    #[test]
    fn award_reports_level_up() {
        let mut progression = Progression::new(250);
        let change = progression.award(100);
        assert_eq!(change.previous_level, 1);
        assert_eq!(change.new_level, 2);
        assert!(change.leveled_up);

        let change = progression.award(10);
        assert!(!change.leveled_up);
    }

    #[test]
    fn award_saturates() {
        let mut progression = Progression::new(u32::MAX - 5);
        progression.award(100);
        assert_eq!(progression.experience(), u32::MAX);
        assert_eq!(progression.level(), 20);
    }

    #[test]
    fn deserializes_through_normalization() {
        let progression: Progression =
            serde_json::from_str(r#"{"experience": 900, "level": 1}"#).unwrap();
        assert_eq!(progression.level(), 3);
        let progression: Progression = serde_json::from_str("{}").unwrap();
        assert_eq!(progression.level(), 1);
    }
}
