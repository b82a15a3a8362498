//! Neo4j ownership edges: `(:User)-[:OWNS_CHARACTER]->(:Character)`.

use async_trait::async_trait;
use herobook_domain::{CharacterId, UserId};
use neo4rs::query;

use super::helpers::GraphExt;
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{OwnershipRepo, RepoError};

pub struct Neo4jOwnershipRepo {
    graph: Neo4jGraph,
}

impl Neo4jOwnershipRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl OwnershipRepo for Neo4jOwnershipRepo {
    async fn connect(&self, character_id: CharacterId, user_id: UserId) -> Result<(), RepoError> {
        let q = query(
            "MATCH (u:User {id: $user_id})
            MATCH (c:Character {id: $character_id})
            MERGE (u)-[:OWNS_CHARACTER]->(c)
            RETURN c.id AS id",
        )
        .param("user_id", user_id.to_string())
        .param("character_id", character_id.to_string());

        match self.graph.fetch_one("connect_owner", q).await? {
            Some(_) => {
                tracing::debug!(%character_id, %user_id, "Linked character to owner");
                Ok(())
            }
            // Either endpoint may be missing; report the user since the
            // character was just written by the caller.
            None => Err(RepoError::not_found("User", user_id)),
        }
    }

    async fn is_owner(&self, character_id: CharacterId, user_id: UserId) -> Result<bool, RepoError> {
        let q = query(
            "MATCH (u:User {id: $user_id})-[:OWNS_CHARACTER]->(c:Character {id: $character_id})
            RETURN count(*) > 0 AS owned",
        )
        .param("user_id", user_id.to_string())
        .param("character_id", character_id.to_string());

        match self.graph.fetch_one("is_owner", q).await? {
            Some(row) => row
                .get::<bool>("owned")
                .map_err(|e| RepoError::database("is_owner", e)),
            None => Ok(false),
        }
    }
}
