//! Neo4j character repository implementation.
//!
//! A character is a single `:Character` node holding its stat block as flat
//! properties. Proficiency maps are stored as JSON strings. Spells and
//! features are shared nodes reached through `KNOWS_SPELL` / `HAS_FEATURE`.
//!
//! Records with `deleted_at` set are invisible to reads and writes. Updates
//! are guarded by the `version` property.

use std::collections::BTreeMap;

use async_trait::async_trait;
use herobook_domain::value_objects::{Proficiencies, ProficiencyKey};
use herobook_domain::{Character, CharacterClass, CharacterId, ContentName, UserId};
use neo4rs::{query, Node, Query, Row};

use super::helpers::{opt_str, parse_typed_id, row_node, GraphExt, NodeExt};
use super::stat_block::{node_to_core, set_clause, with_core_params, CORE_PROPERTIES};
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{CharacterRepo, RepoError};

/// Character-only properties, written alongside [`CORE_PROPERTIES`].
const CHARACTER_PROPERTIES: &[&str] = &[
    "class",
    "background",
    "subclass",
    "saving_throws",
    "skills",
    "updated_at",
    "deleted_at",
];

/// Matches characters without a soft-delete marker. Expects the node bound to `c`.
const LIVE: &str = "coalesce(c.deleted_at, '') = ''";

pub struct Neo4jCharacterRepo {
    graph: Neo4jGraph,
}

impl Neo4jCharacterRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }

    fn all_properties() -> Vec<&'static str> {
        CORE_PROPERTIES
            .iter()
            .chain(CHARACTER_PROPERTIES)
            .copied()
            .collect()
    }

    async fn list_content(
        &self,
        operation: &'static str,
        q: Query,
    ) -> Result<Vec<ContentName>, RepoError> {
        let rows = self.graph.fetch_all(operation, q).await?;
        rows.into_iter()
            .map(|row| {
                let name: String = row
                    .get("name")
                    .map_err(|e| RepoError::database(operation, e))?;
                ContentName::new(name).map_err(|e| RepoError::database("parse", e))
            })
            .collect()
    }
}

fn with_character_params(q: Query, character: &Character) -> Result<Query, RepoError> {
    let saving_throws = serde_json::to_string(&character.saving_throws().to_stored())
        .map_err(RepoError::serialization)?;
    let skills =
        serde_json::to_string(&character.skills().to_stored()).map_err(RepoError::serialization)?;

    let q = with_core_params(q, character.core())
        .param("id", character.id().to_string())
        .param("class", character.class().label())
        .param("background", opt_str(character.background()))
        .param("subclass", opt_str(character.subclass()))
        .param("saving_throws", saving_throws)
        .param("skills", skills)
        .param("created_at", character.created_at().to_rfc3339())
        .param("updated_at", character.updated_at().to_rfc3339())
        .param("version", stored_version(character)?)
        .param(
            "deleted_at",
            character
                .deleted_at()
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
        );
    Ok(q)
}

#[async_trait]
impl CharacterRepo for Neo4jCharacterRepo {
    async fn create(&self, character: &Character) -> Result<(), RepoError> {
        let cypher = format!(
            "CREATE (c:Character {{id: $id, created_at: $created_at, version: $version}})
            SET {}",
            set_clause("c", &Self::all_properties())
        );
        let q = with_character_params(query(&cypher), character)?;

        self.graph.run_or_err("create_character", q).await?;
        tracing::debug!(character_id = %character.id(), "Created character");
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let cypher = format!("MATCH (c:Character {{id: $id}}) WHERE {LIVE} RETURN c");
        let q = query(&cypher).param("id", id.to_string());

        self.graph
            .fetch_one("get_character", q)
            .await?
            .map(row_to_character)
            .transpose()
    }

    async fn update(&self, character: &Character) -> Result<(), RepoError> {
        let cypher = format!(
            "MATCH (c:Character {{id: $id}})
            WHERE {LIVE} AND coalesce(c.version, 0) = $version
            SET {},
                c.version = $version + 1
            RETURN c.id AS id",
            set_clause("c", &Self::all_properties())
        );
        let q = with_character_params(query(&cypher), character)?;

        if self.graph.fetch_one("update_character", q).await?.is_some() {
            tracing::debug!(
                character_id = %character.id(),
                version = character.version() + 1,
                "Updated character"
            );
            return Ok(());
        }

        // Nothing matched: either the character is gone or its version moved on.
        let cypher = format!("MATCH (c:Character {{id: $id}}) WHERE {LIVE} RETURN c.id AS id");
        let q = query(&cypher).param("id", character.id().to_string());
        match self.graph.fetch_one("update_character", q).await? {
            Some(_) => Err(RepoError::conflict("Character", character.id())),
            None => Err(RepoError::not_found("Character", character.id())),
        }
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError> {
        let q = query(
            "MATCH (c:Character {id: $id})
            DETACH DELETE c
            RETURN count(*) AS deleted",
        )
        .param("id", id.to_string());

        let deleted = match self.graph.fetch_one("delete_character", q).await? {
            Some(row) => row
                .get::<i64>("deleted")
                .map_err(|e| RepoError::database("delete_character", e))?,
            None => 0,
        };
        if deleted > 0 {
            tracing::debug!(character_id = %id, "Deleted character");
        }
        Ok(deleted > 0)
    }

    async fn list_owned_by(&self, user_id: UserId) -> Result<Vec<Character>, RepoError> {
        let cypher = format!(
            "MATCH (u:User {{id: $user_id}})-[:OWNS_CHARACTER]->(c:Character)
            WHERE {LIVE}
            RETURN c
            ORDER BY c.created_at"
        );
        let q = query(&cypher).param("user_id", user_id.to_string());

        self.graph
            .fetch_all("list_owned_characters", q)
            .await?
            .into_iter()
            .map(row_to_character)
            .collect()
    }

    async fn add_spell(&self, id: CharacterId, spell: &ContentName) -> Result<(), RepoError> {
        let q = query(
            "MATCH (c:Character {id: $id})
            MERGE (s:Spell {name: $name})
            MERGE (c)-[:KNOWS_SPELL]->(s)
            RETURN c.id AS id",
        )
        .param("id", id.to_string())
        .param("name", spell.as_str());

        match self.graph.fetch_one("add_spell", q).await? {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found("Character", id)),
        }
    }

    async fn list_spells(&self, id: CharacterId) -> Result<Vec<ContentName>, RepoError> {
        let q = query(
            "MATCH (c:Character {id: $id})-[:KNOWS_SPELL]->(s:Spell)
            RETURN s.name AS name
            ORDER BY name",
        )
        .param("id", id.to_string());

        self.list_content("list_spells", q).await
    }

    async fn add_feature(&self, id: CharacterId, feature: &ContentName) -> Result<(), RepoError> {
        let q = query(
            "MATCH (c:Character {id: $id})
            MERGE (f:Feature {name: $name})
            MERGE (c)-[:HAS_FEATURE]->(f)
            RETURN c.id AS id",
        )
        .param("id", id.to_string())
        .param("name", feature.as_str());

        match self.graph.fetch_one("add_feature", q).await? {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found("Character", id)),
        }
    }

    async fn list_features(&self, id: CharacterId) -> Result<Vec<ContentName>, RepoError> {
        let q = query(
            "MATCH (c:Character {id: $id})-[:HAS_FEATURE]->(f:Feature)
            RETURN f.name AS name
            ORDER BY name",
        )
        .param("id", id.to_string());

        self.list_content("list_features", q).await
    }
}

// =============================================================================
// Row conversion helpers
// =============================================================================

fn row_to_character(row: Row) -> Result<Character, RepoError> {
    let node: Node = row_node(&row, "c")?;
    node_to_character(&node)
}

fn node_to_character(node: &Node) -> Result<Character, RepoError> {
    let id: CharacterId = parse_typed_id(node, "id")?;
    let core = node_to_core(node, "Character", &id.to_string())?;
    let class: CharacterClass = node.get_parsed("class")?;

    let created_at = node.get_datetime_strict("created_at")?;
    let updated_at = node
        .get_optional_datetime("updated_at")?
        .unwrap_or(created_at);
    let deleted_at = node.get_optional_datetime("deleted_at")?;

    let mut character = Character::new(core.name().clone(), class, created_at)
        .with_id(id)
        .with_core(core)
        .with_saving_throws(stored_proficiencies(node, "saving_throws"))
        .with_skills(stored_proficiencies(node, "skills"))
        .with_timestamps(created_at, updated_at)
        .with_deleted_at(deleted_at)
        .with_version(u64::try_from(node.get_optional_i64("version").unwrap_or(0)).unwrap_or(0));

    if let Some(background) = node.get_optional_string("background") {
        character = character.with_background(background);
    }
    if let Some(subclass) = node.get_optional_string("subclass") {
        character = character.with_subclass(subclass);
    }

    Ok(character)
}

fn stored_version(character: &Character) -> Result<i64, RepoError> {
    i64::try_from(character.version())
        .map_err(|_| RepoError::serialization(format!("version overflow on {}", character.id())))
}

/// Lenient parse: unknown keys are skipped (and logged by `from_stored`).
fn stored_proficiencies<K: ProficiencyKey>(node: &Node, field: &str) -> Proficiencies<K> {
    let raw: BTreeMap<String, bool> = node.get_json_or_default(field);
    Proficiencies::from_stored(raw).0
}
