//! Neo4j monster repository implementation.
//!
//! Monsters are unowned `:Monster` nodes with the same flat stat-block
//! properties as characters.

use async_trait::async_trait;
use herobook_domain::{Monster, MonsterId, MonsterType};
use neo4rs::{query, Node, Query, Row};

use super::helpers::{parse_typed_id, row_node, GraphExt, NodeExt};
use super::stat_block::{node_to_core, set_clause, with_core_params, CORE_PROPERTIES};
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{MonsterRepo, RepoError};

const MONSTER_PROPERTIES: &[&str] = &[
    "monster_type",
    "challenge_rating",
    "experience_points",
    "updated_at",
];

pub struct Neo4jMonsterRepo {
    graph: Neo4jGraph,
}

impl Neo4jMonsterRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }

    fn all_properties() -> Vec<&'static str> {
        CORE_PROPERTIES
            .iter()
            .chain(MONSTER_PROPERTIES)
            .copied()
            .collect()
    }
}

fn with_monster_params(q: Query, monster: &Monster) -> Query {
    with_core_params(q, monster.core())
        .param("id", monster.id().to_string())
        .param("monster_type", monster.monster_type().label())
        .param("challenge_rating", monster.challenge_rating())
        .param("experience_points", i64::from(monster.experience_points()))
        .param("created_at", monster.created_at().to_rfc3339())
        .param("updated_at", monster.updated_at().to_rfc3339())
}

#[async_trait]
impl MonsterRepo for Neo4jMonsterRepo {
    async fn create(&self, monster: &Monster) -> Result<(), RepoError> {
        let cypher = format!(
            "CREATE (m:Monster {{id: $id, created_at: $created_at}})
            SET {}",
            set_clause("m", &Self::all_properties())
        );
        let q = with_monster_params(query(&cypher), monster);

        self.graph.run_or_err("create_monster", q).await?;
        tracing::debug!(monster_id = %monster.id(), "Created monster");
        Ok(())
    }

    async fn get(&self, id: MonsterId) -> Result<Option<Monster>, RepoError> {
        let q = query("MATCH (m:Monster {id: $id}) RETURN m").param("id", id.to_string());

        self.graph
            .fetch_one("get_monster", q)
            .await?
            .map(row_to_monster)
            .transpose()
    }

    async fn update(&self, monster: &Monster) -> Result<(), RepoError> {
        let cypher = format!(
            "MATCH (m:Monster {{id: $id}})
            SET {}
            RETURN m.id AS id",
            set_clause("m", &Self::all_properties())
        );
        let q = with_monster_params(query(&cypher), monster);

        match self.graph.fetch_one("update_monster", q).await? {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found("Monster", monster.id())),
        }
    }

    async fn delete(&self, id: MonsterId) -> Result<bool, RepoError> {
        let q = query(
            "MATCH (m:Monster {id: $id})
            DETACH DELETE m
            RETURN count(*) AS deleted",
        )
        .param("id", id.to_string());

        let deleted = match self.graph.fetch_one("delete_monster", q).await? {
            Some(row) => row
                .get::<i64>("deleted")
                .map_err(|e| RepoError::database("delete_monster", e))?,
            None => 0,
        };
        Ok(deleted > 0)
    }

    async fn list(&self) -> Result<Vec<Monster>, RepoError> {
        let q = query("MATCH (m:Monster) RETURN m ORDER BY m.name");

        self.graph
            .fetch_all("list_monsters", q)
            .await?
            .into_iter()
            .map(row_to_monster)
            .collect()
    }
}

fn row_to_monster(row: Row) -> Result<Monster, RepoError> {
    let node: Node = row_node(&row, "m")?;
    let id: MonsterId = parse_typed_id(&node, "id")?;
    let core = node_to_core(&node, "Monster", &id.to_string())?;
    let monster_type: MonsterType = node.get_parsed("monster_type")?;

    let created_at = node.get_datetime_strict("created_at")?;
    let updated_at = node
        .get_optional_datetime("updated_at")?
        .unwrap_or(created_at);
    let experience_points = node
        .get_optional_i64("experience_points")
        .and_then(|xp| u32::try_from(xp).ok())
        .unwrap_or(0);

    Monster::new(core.name().clone(), monster_type, created_at)
        .with_id(id)
        .with_core(core)
        .with_experience_points(experience_points)
        .with_timestamps(created_at, updated_at)
        .with_challenge_rating(node.get_f64_or("challenge_rating", 0.0))
        .map_err(|e| RepoError::database("parse", e))
}
