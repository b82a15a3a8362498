//! Saving-throw and skill proficiency flags.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ability::Ability;
use super::skill::Skill;

/// A closed key set that proficiency flags can be attached to.
pub trait ProficiencyKey:
    Copy + Ord + Debug + FromStr + Serialize + DeserializeOwned + 'static
{
    /// Every key, in canonical order.
    fn all() -> &'static [Self];
    fn key(self) -> &'static str;
}

impl ProficiencyKey for Ability {
    fn all() -> &'static [Self] {
        &Ability::ALL
    }

    fn key(self) -> &'static str {
        Ability::key(self)
    }
}

impl ProficiencyKey for Skill {
    fn all() -> &'static [Self] {
        &Skill::ALL
    }

    fn key(self) -> &'static str {
        Skill::key(self)
    }
}

/// One boolean per key. Keys that were never set read as not proficient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: ProficiencyKey"))]
#[serde(transparent)]
pub struct Proficiencies<K: ProficiencyKey> {
    flags: BTreeMap<K, bool>,
}

pub type SavingThrowProficiencies = Proficiencies<Ability>;
pub type SkillProficiencies = Proficiencies<Skill>;

impl<K: ProficiencyKey> Default for Proficiencies<K> {
    fn default() -> Self {
        Self {
            flags: K::all().iter().map(|k| (*k, false)).collect(),
        }
    }
}

impl<K: ProficiencyKey> Proficiencies<K> {
    /// All keys present, none proficient.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_proficient(&self, key: K) -> bool {
        self.flags.get(&key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: K, proficient: bool) {
        self.flags.insert(key, proficient);
    }

    pub fn with(mut self, key: K, proficient: bool) -> Self {
        self.set(key, proficient);
        self
    }

    /// Every key in canonical order with its flag.
    pub fn iter(&self) -> impl Iterator<Item = (K, bool)> + '_ {
        K::all().iter().map(move |k| (*k, self.is_proficient(*k)))
    }

    pub fn proficient_keys(&self) -> Vec<K> {
        self.iter().filter(|(_, p)| *p).map(|(k, _)| k).collect()
    }

    /// Build from a stored string-keyed map.
    ///
    /// Unknown keys are skipped and returned so the caller can report them;
    /// a stored record with a stray key still loads.
    pub fn from_stored<I, S>(raw: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut result = Self::none();
        let mut skipped = Vec::new();
        for (key, flag) in raw {
            match key.as_ref().parse::<K>() {
                Ok(k) => result.set(k, flag),
                Err(_) => {
                    tracing::warn!(key = key.as_ref(), "Skipping unknown proficiency key");
                    skipped.push(key.as_ref().to_string());
                }
            }
        }
        (result, skipped)
    }

    /// String-keyed map for storage.
    pub fn to_stored(&self) -> BTreeMap<String, bool> {
        self.iter().map(|(k, p)| (k.key().to_string(), p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_every_key_unset() {
        let skills = SkillProficiencies::none();
        assert_eq!(skills.iter().count(), 18);
        assert!(skills.proficient_keys().is_empty());
    }

    #[test]
    fn from_stored_skips_unknown_keys() {
        let (skills, skipped) = SkillProficiencies::from_stored(vec![
            ("stealth", true),
            ("juggling", true),
            ("Sleight of Hand", true),
        ]);
        assert!(skills.is_proficient(Skill::Stealth));
        assert!(skills.is_proficient(Skill::SleightOfHand));
        assert!(!skills.is_proficient(Skill::Arcana));
        assert_eq!(skipped, vec!["juggling".to_string()]);
    }

    #[test]
    fn stored_map_uses_snake_case_keys() {
        let saves = SavingThrowProficiencies::none()
            .with(Ability::Wisdom, true)
            .with(Ability::Charisma, true);
        let stored = saves.to_stored();
        assert_eq!(stored.len(), 6);
        assert_eq!(stored.get("wisdom"), Some(&true));
        assert_eq!(stored.get("strength"), Some(&false));
    }

    #[test]
    fn serializes_as_plain_map() {
        let saves = SavingThrowProficiencies::none().with(Ability::Dexterity, true);
        let json = serde_json::to_value(&saves).unwrap();
        assert_eq!(json["dexterity"], serde_json::Value::Bool(true));
        assert_eq!(json["constitution"], serde_json::Value::Bool(false));
    }
}
