//! Neo4j deserialization helpers for row conversion functions.
//!
//! Extension traits and small helpers that keep the row converters in the
//! repository modules short.

use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use neo4rs::{Node, Query, Row};
use uuid::Uuid;

use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::RepoError;

// =============================================================================
// Graph Extension Trait (Error Mapping)
// =============================================================================

/// Standardized error mapping from neo4rs to `RepoError`.
///
/// ```ignore
/// graph.run_or_err("delete_character", query).await?;
/// let row = graph.fetch_one("get_character", query).await?;
/// ```
#[async_trait::async_trait]
pub trait GraphExt {
    /// Execute a query that doesn't return results.
    async fn run_or_err(&self, operation: &'static str, query: Query) -> Result<(), RepoError>;

    /// First row of the result, if any.
    async fn fetch_one(&self, operation: &'static str, query: Query)
        -> Result<Option<Row>, RepoError>;

    /// Every row of the result.
    async fn fetch_all(&self, operation: &'static str, query: Query) -> Result<Vec<Row>, RepoError>;
}

#[async_trait::async_trait]
impl GraphExt for Neo4jGraph {
    async fn run_or_err(&self, operation: &'static str, query: Query) -> Result<(), RepoError> {
        self.run(query)
            .await
            .map_err(|e| RepoError::database(operation, e))
    }

    async fn fetch_one(
        &self,
        operation: &'static str,
        query: Query,
    ) -> Result<Option<Row>, RepoError> {
        let mut result = self
            .execute(query)
            .await
            .map_err(|e| RepoError::database(operation, e))?;
        result
            .next()
            .await
            .map_err(|e| RepoError::database(operation, e))
    }

    async fn fetch_all(&self, operation: &'static str, query: Query) -> Result<Vec<Row>, RepoError> {
        let mut result = self
            .execute(query)
            .await
            .map_err(|e| RepoError::database(operation, e))?;
        let mut rows = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| RepoError::database(operation, e))?
        {
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Extension trait for Neo4j Node to simplify common deserialization patterns.
pub trait NodeExt {
    /// Get a required UUID field and parse it.
    fn get_uuid(&self, field: &str) -> Result<Uuid>;

    /// Get an optional string field, returning None if empty or missing.
    fn get_optional_string(&self, field: &str) -> Option<String>;

    /// Get an integer field, `None` if missing or not an integer.
    fn get_optional_i64(&self, field: &str) -> Option<i64>;

    /// Get an integer field narrowed to `i32`, with a default if missing or out of range.
    fn get_i32_or(&self, field: &str, default: i32) -> i32;

    /// Get an f64 field with a default value if missing.
    fn get_f64_or(&self, field: &str, default: f64) -> f64;

    /// Get and deserialize a JSON field with default on error.
    fn get_json_or_default<T: serde::de::DeserializeOwned + Default>(&self, field: &str) -> T;

    /// Get a required string field with strict error handling (fail-fast).
    fn get_string_strict(&self, field: &str) -> Result<String, RepoError>;

    /// Get a required RFC 3339 timestamp with strict error handling (fail-fast).
    fn get_datetime_strict(&self, field: &str) -> Result<DateTime<Utc>, RepoError>;

    /// Get an optional RFC 3339 timestamp; empty or missing reads as `None`.
    fn get_optional_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, RepoError>;

    /// Parse a required field through `FromStr` (closed enumerations).
    fn get_parsed<T>(&self, field: &str) -> Result<T, RepoError>
    where
        T: FromStr,
        T::Err: std::fmt::Display;
}

impl NodeExt for Node {
    fn get_uuid(&self, field: &str) -> Result<Uuid> {
        let s: String = self
            .get(field)
            .with_context(|| format!("Missing field: {}", field))?;
        Uuid::parse_str(&s).with_context(|| format!("Invalid UUID in field '{}': {}", field, s))
    }

    fn get_optional_string(&self, field: &str) -> Option<String> {
        self.get::<String>(field).ok().filter(|s| !s.is_empty())
    }

    fn get_optional_i64(&self, field: &str) -> Option<i64> {
        self.get::<i64>(field).ok()
    }

    fn get_i32_or(&self, field: &str, default: i32) -> i32 {
        self.get_optional_i64(field)
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(default)
    }

    fn get_f64_or(&self, field: &str, default: f64) -> f64 {
        self.get(field).unwrap_or(default)
    }

    fn get_json_or_default<T: serde::de::DeserializeOwned + Default>(&self, field: &str) -> T {
        self.get::<String>(field)
            .ok()
            .filter(|s| !s.is_empty())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn get_string_strict(&self, field: &str) -> Result<String, RepoError> {
        self.get(field).map_err(|e| {
            RepoError::database(
                "query",
                format!("Missing required field '{}': {}", field, e),
            )
        })
    }

    fn get_datetime_strict(&self, field: &str) -> Result<DateTime<Utc>, RepoError> {
        let s = self.get_string_strict(field)?;
        parse_datetime(field, &s)
    }

    fn get_optional_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, RepoError> {
        self.get_optional_string(field)
            .map(|s| parse_datetime(field, &s))
            .transpose()
    }

    fn get_parsed<T>(&self, field: &str) -> Result<T, RepoError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let s = self.get_string_strict(field)?;
        s.parse::<T>().map_err(|e| {
            RepoError::database(
                "parse",
                format!("Invalid value in field '{}': {} (value: '{}')", field, e, s),
            )
        })
    }
}

fn parse_datetime(field: &str, s: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            RepoError::database(
                "parse",
                format!("Invalid datetime in field '{}': {} (value: '{}')", field, e, s),
            )
        })
}

/// Parse a typed ID from a Neo4j node field.
pub fn parse_typed_id<T>(node: &Node, field: &str) -> Result<T, RepoError>
where
    T: From<Uuid>,
{
    node.get_uuid(field)
        .map(T::from)
        .map_err(|e| RepoError::database("parse", e))
}

/// Pull a node column out of a row.
pub fn row_node(row: &Row, column: &str) -> Result<Node, RepoError> {
    row.get(column).map_err(|e| RepoError::database("query", e))
}

/// `""` for `None`; empty strings read back as `None`.
pub fn opt_str(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Unique-constraint failures surface as client errors naming the constraint check.
pub fn is_constraint_violation(error: &neo4rs::Error) -> bool {
    let message = error.to_string();
    message.contains("ConstraintValidationFailed") || message.contains("already exists with label")
}
