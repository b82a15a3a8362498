//! Closed descriptive enumerations: race, class, alignment, size, monster type.
//!
//! Each serializes as its display label (`"Half-Elf"`, `"Lawful Good"`) and
//! parses case-insensitively from the label or its snake_case form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = normalize(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| normalize(v.label()) == needle)
                    .ok_or_else(|| DomainError::parse(format!("Unknown {}: {}", $what, s)))
            }
        }
    };
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

labeled_enum! {
    Race, "race" {
        Dragonborn => "Dragonborn",
        Dwarf => "Dwarf",
        Elf => "Elf",
        Gnome => "Gnome",
        HalfElf => "Half-Elf",
        Halfling => "Halfling",
        HalfOrc => "Half-Orc",
        Human => "Human",
        Tiefling => "Tiefling",
    }
}

labeled_enum! {
    CharacterClass, "class" {
        Barbarian => "Barbarian",
        Bard => "Bard",
        Cleric => "Cleric",
        Druid => "Druid",
        Fighter => "Fighter",
        Monk => "Monk",
        Paladin => "Paladin",
        Ranger => "Ranger",
        Rogue => "Rogue",
        Sorcerer => "Sorcerer",
        Warlock => "Warlock",
        Wizard => "Wizard",
    }
}

labeled_enum! {
    Alignment, "alignment" {
        Unaligned => "Unaligned",
        LawfulGood => "Lawful Good",
        NeutralGood => "Neutral Good",
        ChaoticGood => "Chaotic Good",
        LawfulNeutral => "Lawful Neutral",
        TrueNeutral => "True Neutral",
        ChaoticNeutral => "Chaotic Neutral",
        LawfulEvil => "Lawful Evil",
        NeutralEvil => "Neutral Evil",
        ChaoticEvil => "Chaotic Evil",
    }
}

labeled_enum! {
    Size, "size" {
        Tiny => "Tiny",
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
        Huge => "Huge",
        Gargantuan => "Gargantuan",
    }
}

labeled_enum! {
    MonsterType, "monster type" {
        Aberration => "Aberration",
        Beast => "Beast",
        Celestial => "Celestial",
        Construct => "Construct",
        Dragon => "Dragon",
        Elemental => "Elemental",
        Fey => "Fey",
        Fiend => "Fiend",
        Giant => "Giant",
        Humanoid => "Humanoid",
        Monstrosity => "Monstrosity",
        Ooze => "Ooze",
        Plant => "Plant",
        Undead => "Undead",
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Unaligned
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::Medium
    }
}
