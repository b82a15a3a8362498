//! Neo4j schema initialization - constraints and indexes.

use neo4rs::query;

use crate::infrastructure::neo4j::Neo4jGraph;

/// Initialize Neo4j schema with required constraints and indexes.
///
/// This should be called once on startup. Constraints are created with
/// IF NOT EXISTS to be idempotent.
pub async fn ensure_schema(graph: &Neo4jGraph) -> Result<(), neo4rs::Error> {
    let statements = [
        "CREATE CONSTRAINT user_id_unique IF NOT EXISTS
         FOR (u:User) REQUIRE u.id IS UNIQUE",
        // Registration relies on these two to reject duplicates.
        "CREATE CONSTRAINT user_username_unique IF NOT EXISTS
         FOR (u:User) REQUIRE u.username IS UNIQUE",
        "CREATE CONSTRAINT user_email_unique IF NOT EXISTS
         FOR (u:User) REQUIRE u.email IS UNIQUE",
        "CREATE CONSTRAINT character_id_unique IF NOT EXISTS
         FOR (c:Character) REQUIRE c.id IS UNIQUE",
        "CREATE CONSTRAINT monster_id_unique IF NOT EXISTS
         FOR (m:Monster) REQUIRE m.id IS UNIQUE",
        // Spell and feature nodes are shared by name.
        "CREATE CONSTRAINT spell_name_unique IF NOT EXISTS
         FOR (s:Spell) REQUIRE s.name IS UNIQUE",
        "CREATE CONSTRAINT feature_name_unique IF NOT EXISTS
         FOR (f:Feature) REQUIRE f.name IS UNIQUE",
    ];

    for statement in statements {
        graph.run(query(statement)).await?;
    }

    tracing::info!("Neo4j schema initialized (constraints and indexes ensured)");
    Ok(())
}
