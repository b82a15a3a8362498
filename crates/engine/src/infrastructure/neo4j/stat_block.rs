//! Flat node properties for the `CoreStats` block shared by characters and monsters.

use herobook_domain::value_objects::{
    DEFAULT_ABILITY_SCORE, DEFAULT_ARMOR_CLASS, DEFAULT_HIT_DICE, DEFAULT_SPEED,
};
use herobook_domain::{
    Ability, AbilityScores, CharacterName, CombatStats, CoreStats, Progression,
};
use neo4rs::{Node, Query};

use super::helpers::{opt_str, NodeExt};
use crate::infrastructure::ports::RepoError;

/// Properties written for every stat block, in `SET` order.
pub(super) const CORE_PROPERTIES: &[&str] = &[
    "name",
    "race",
    "alignment",
    "size",
    "description",
    "strength",
    "dexterity",
    "constitution",
    "intelligence",
    "wisdom",
    "charisma",
    "armor_class",
    "initiative",
    "speed",
    "hit_points",
    "current_hit_points",
    "temp_hit_points",
    "hit_dice",
    "experience",
    "level",
    "image_path",
    "icon_path",
];

/// `var.prop = $prop` for each property, comma separated.
pub(super) fn set_clause(var: &str, properties: &[&str]) -> String {
    properties
        .iter()
        .map(|p| format!("{var}.{p} = ${p}"))
        .collect::<Vec<_>>()
        .join(",\n    ")
}

/// Bind every [`CORE_PROPERTIES`] parameter.
///
/// The level is always written from the experience total, which resyncs
/// records loaded with a stale level.
pub(super) fn with_core_params(q: Query, core: &CoreStats) -> Query {
    let abilities = core.abilities();
    let combat = core.combat();
    let q = Ability::ALL.iter().fold(q, |q, ability| {
        q.param(ability.key(), i64::from(abilities.get(*ability)))
    });

    q.param("name", core.name().to_string())
        .param(
            "race",
            core.race().map(|r| r.label().to_string()).unwrap_or_default(),
        )
        .param("alignment", core.alignment().label())
        .param("size", core.size().label())
        .param("description", opt_str(core.description()))
        .param("armor_class", i64::from(combat.armor_class))
        .param("initiative", i64::from(combat.initiative))
        .param("speed", i64::from(combat.speed))
        .param("hit_points", i64::from(combat.hit_points))
        .param("current_hit_points", i64::from(combat.current_hit_points))
        .param("temp_hit_points", i64::from(combat.temp_hit_points))
        .param("hit_dice", combat.hit_dice.clone())
        .param("experience", i64::from(core.experience()))
        .param("level", i64::from(core.level()))
        .param("image_path", opt_str(core.image_path()))
        .param("icon_path", opt_str(core.icon_path()))
}

/// Rebuild a `CoreStats` from node properties.
///
/// Missing numeric properties fall back to their defaults. A stored level that
/// disagrees with the experience total is replaced by the derived one.
pub(super) fn node_to_core(
    node: &Node,
    entity_type: &'static str,
    id: &str,
) -> Result<CoreStats, RepoError> {
    let name = CharacterName::new(node.get_string_strict("name")?)
        .map_err(|e| RepoError::database("parse", e))?;

    let mut abilities = AbilityScores::default();
    for ability in Ability::ALL {
        abilities.set(ability, node.get_i32_or(ability.key(), DEFAULT_ABILITY_SCORE));
    }

    let combat = CombatStats {
        armor_class: node.get_i32_or("armor_class", DEFAULT_ARMOR_CLASS),
        initiative: node.get_i32_or("initiative", 0),
        speed: node.get_i32_or("speed", DEFAULT_SPEED),
        hit_points: node.get_i32_or("hit_points", 0),
        current_hit_points: node.get_i32_or("current_hit_points", 0),
        temp_hit_points: node.get_i32_or("temp_hit_points", 0),
        hit_dice: node
            .get_optional_string("hit_dice")
            .unwrap_or_else(|| DEFAULT_HIT_DICE.to_string()),
    };

    let stored_level = node.get_optional_i64("level");
    let (progression, stale) =
        Progression::from_stored(node.get_optional_i64("experience"), stored_level);
    if stale {
        tracing::debug!(
            entity_type,
            id,
            stored_level = ?stored_level,
            derived_level = progression.level(),
            "Stored level disagrees with experience, using derived level"
        );
    }

    let mut core = CoreStats::new(name)
        .with_abilities(abilities)
        .with_combat(combat)
        .with_progression(progression);

    if let Some(race) = node.get_optional_string("race") {
        core = core.with_race(race.parse().map_err(|e| RepoError::database("parse", e))?);
    }
    if let Some(alignment) = node.get_optional_string("alignment") {
        core = core.with_alignment(
            alignment
                .parse()
                .map_err(|e| RepoError::database("parse", e))?,
        );
    }
    if let Some(size) = node.get_optional_string("size") {
        core = core.with_size(size.parse().map_err(|e| RepoError::database("parse", e))?);
    }
    if let Some(description) = node.get_optional_string("description") {
        core = core.with_description(description);
    }
    if let Some(path) = node.get_optional_string("image_path") {
        core = core.with_image_path(path);
    }
    if let Some(path) = node.get_optional_string("icon_path") {
        core = core.with_icon_path(path);
    }

    Ok(core)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_clause_binds_each_property() {
        let clause = set_clause("c", &["name", "level"]);
        assert_eq!(clause, "c.name = $name,\n    c.level = $level");
    }

    #[test]
    fn core_properties_cover_every_ability() {
        for ability in Ability::ALL {
            assert!(CORE_PROPERTIES.contains(&ability.key()));
        }
    }
}
