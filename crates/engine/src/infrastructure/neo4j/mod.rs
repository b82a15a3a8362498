//! Neo4j database implementations.

use std::sync::Arc;

mod graph;
mod helpers;
mod schema;
mod stat_block;

mod character_repo;
mod monster_repo;
mod ownership_repo;
mod user_repo;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub(crate) mod test_harness;

pub use graph::{Neo4jGraph, Neo4jRowStream};
pub use schema::ensure_schema;

pub use character_repo::Neo4jCharacterRepo;
pub use monster_repo::Neo4jMonsterRepo;
pub use ownership_repo::Neo4jOwnershipRepo;
pub use user_repo::Neo4jUserRepo;

/// Create all Neo4j repositories from a graph connection.
pub struct Neo4jRepositories {
    pub character: Arc<Neo4jCharacterRepo>,
    pub ownership: Arc<Neo4jOwnershipRepo>,
    pub monster: Arc<Neo4jMonsterRepo>,
    pub user: Arc<Neo4jUserRepo>,
}

impl Neo4jRepositories {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self {
            character: Arc::new(Neo4jCharacterRepo::new(graph.clone())),
            ownership: Arc::new(Neo4jOwnershipRepo::new(graph.clone())),
            monster: Arc::new(Neo4jMonsterRepo::new(graph.clone())),
            user: Arc::new(Neo4jUserRepo::new(graph)),
        }
    }
}
