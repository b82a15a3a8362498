//! Neo4j test harness for adapter integration tests.
//!
//! Provides testcontainer-based Neo4j instance management.

use std::time::Duration;

use neo4rs::{query, Graph};
use testcontainers::{core::WaitFor, runners::AsyncRunner, ContainerAsync, GenericImage};
use tokio::time::sleep;

use super::{ensure_schema, Neo4jGraph};

/// Password used for Neo4j test containers.
pub const TEST_NEO4J_PASSWORD: &str = "testpassword";

type HarnessError = Box<dyn std::error::Error + Send + Sync>;

/// Neo4j test harness managing container lifecycle.
pub struct Neo4jTestHarness {
    _container: ContainerAsync<GenericImage>,
    graph: Neo4jGraph,
}

impl Neo4jTestHarness {
    /// Start a container, connect, and apply the schema.
    pub async fn start() -> Result<Self, HarnessError> {
        let container: ContainerAsync<GenericImage> =
            neo4j_image(TEST_NEO4J_PASSWORD).start().await;
        let bolt_port = container.get_host_port_ipv4(7687).await;
        let uri = format!("bolt://127.0.0.1:{bolt_port}");

        let graph = Neo4jGraph::new(connect_with_retry(&uri, "neo4j", TEST_NEO4J_PASSWORD).await?);
        ensure_schema(&graph).await?;

        Ok(Self {
            _container: container,
            graph,
        })
    }

    pub fn graph(&self) -> Neo4jGraph {
        self.graph.clone()
    }
}

/// Pinned Neo4j image with small memory limits.
///
/// Readiness is verified by [`connect_with_retry`] rather than log parsing.
pub fn neo4j_image(password: &str) -> GenericImage {
    GenericImage::new("neo4j", "5.26.0-community")
        .with_env_var("NEO4J_AUTH", format!("neo4j/{password}"))
        .with_env_var("NEO4J_server_memory_heap_initial__size", "256m")
        .with_env_var("NEO4J_server_memory_heap_max__size", "512m")
        .with_env_var("NEO4J_server_memory_pagecache_size", "128m")
        .with_exposed_port(7687)
        .with_wait_for(WaitFor::seconds(5))
}

/// Connect with exponential backoff (500ms doubling, capped at 5s, 30 attempts).
pub async fn connect_with_retry(uri: &str, user: &str, pass: &str) -> Result<Graph, HarnessError> {
    let max_attempts = 30;
    let max_delay = Duration::from_secs(5);

    let mut delay = Duration::from_millis(500);
    let mut last_err: Option<String> = None;

    for attempt in 1..=max_attempts {
        match Graph::new(uri, user, pass).await {
            Ok(graph) => match graph.run(query("RETURN 1")).await {
                Ok(_) => {
                    tracing::info!(attempt, uri, "Neo4j connection established and verified");
                    return Ok(graph);
                }
                Err(e) => last_err = Some(format!("Connection test query failed: {e}")),
            },
            Err(e) => last_err = Some(e.to_string()),
        }

        tracing::debug!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = last_err.as_deref().unwrap_or("unknown"),
            "Retrying Neo4j connection"
        );
        sleep(delay).await;
        delay = std::cmp::min(delay.saturating_mul(2), max_delay);
    }

    Err(format!(
        "Failed to connect to Neo4j at {uri} after {max_attempts} attempts: {:?}",
        last_err
    )
    .into())
}
