use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const DEFAULT_ARMOR_CLASS: i32 = 10;
pub const DEFAULT_SPEED: i32 = 30;
pub const DEFAULT_HIT_DICE: &str = "1d8";

/// Stored combat numbers.
///
/// These are never recomputed on read. `current_hit_points` is not bounded by
/// `hit_points`; healing above max and negative values are left to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub armor_class: i32,
    pub initiative: i32,
    pub speed: i32,
    pub hit_points: i32,
    pub current_hit_points: i32,
    pub temp_hit_points: i32,
    pub hit_dice: String,
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            armor_class: DEFAULT_ARMOR_CLASS,
            initiative: 0,
            speed: DEFAULT_SPEED,
            hit_points: 0,
            current_hit_points: 0,
            temp_hit_points: 0,
            hit_dice: DEFAULT_HIT_DICE.to_string(),
        }
    }
}

/// Manual overrides for stored combat numbers. `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOverrides {
    pub armor_class: Option<i32>,
    pub speed: Option<i32>,
    pub hit_points: Option<i32>,
    pub current_hit_points: Option<i32>,
    pub temp_hit_points: Option<i32>,
    pub hit_dice: Option<String>,
}

impl CombatOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(dice) = &self.hit_dice {
            validate_hit_dice(dice)?;
        }
        if matches!(self.speed, Some(s) if s < 0) {
            return Err(DomainError::validation("speed cannot be negative"));
        }
        if matches!(self.temp_hit_points, Some(t) if t < 0) {
            return Err(DomainError::validation("temp_hit_points cannot be negative"));
        }
        Ok(())
    }

    pub fn apply_to(&self, stats: &mut CombatStats) {
        if let Some(ac) = self.armor_class {
            stats.armor_class = ac;
        }
        if let Some(speed) = self.speed {
            stats.speed = speed;
        }
        if let Some(hp) = self.hit_points {
            stats.hit_points = hp;
        }
        if let Some(current) = self.current_hit_points {
            stats.current_hit_points = current;
        }
        if let Some(temp) = self.temp_hit_points {
            stats.temp_hit_points = temp;
        }
        if let Some(dice) = &self.hit_dice {
            stats.hit_dice = dice.clone();
        }
    }
}

/// Accepts `NdM` with positive N and M (`"1d8"`, `"3d10"`).
pub fn validate_hit_dice(expr: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::validation(format!("Invalid hit dice expression: {}", expr));
    let (count, sides) = expr.trim().split_once(['d', 'D']).ok_or_else(invalid)?;
    let count: u32 = count.parse().map_err(|_| invalid())?;
    let sides: u32 = sides.parse().map_err(|_| invalid())?;
    if count == 0 || sides == 0 {
        return Err(invalid());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let stats = CombatStats::default();
        assert_eq!(stats.armor_class, 10);
        assert_eq!(stats.speed, 30);
        assert_eq!(stats.hit_points, 0);
        assert_eq!(stats.hit_dice, "1d8");
    }

    #[test]
    fn overrides_only_touch_set_fields() {
        let mut stats = CombatStats::default();
        CombatOverrides {
            armor_class: Some(16),
            current_hit_points: Some(-3),
            ..Default::default()
        }
        .apply_to(&mut stats);
        assert_eq!(stats.armor_class, 16);
        assert_eq!(stats.current_hit_points, -3);
        assert_eq!(stats.speed, 30);
    }

    #[test]
    fn hit_dice_format() {
        assert!(validate_hit_dice("1d8").is_ok());
        assert!(validate_hit_dice("3D10").is_ok());
        assert!(validate_hit_dice("d8").is_err());
        assert!(validate_hit_dice("0d6").is_err());
        assert!(validate_hit_dice("fireball").is_err());
    }
}
