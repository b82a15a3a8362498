//! Neo4j user repository implementation.

use async_trait::async_trait;
use herobook_domain::{Email, User, UserId, Username};
use neo4rs::{query, Node, Query, Row};

use super::helpers::{is_constraint_violation, opt_str, parse_typed_id, row_node, GraphExt, NodeExt};
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{RepoError, UserRepo};

pub struct Neo4jUserRepo {
    graph: Neo4jGraph,
}

impl Neo4jUserRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }

    async fn find_one(&self, operation: &'static str, q: Query) -> Result<Option<User>, RepoError> {
        self.graph
            .fetch_one(operation, q)
            .await?
            .map(row_to_user)
            .transpose()
    }
}

#[async_trait]
impl UserRepo for Neo4jUserRepo {
    async fn create(&self, user: &User) -> Result<(), RepoError> {
        let q = query(
            "CREATE (u:User {
                id: $id,
                username: $username,
                email: $email,
                credential_hash: $credential_hash,
                avatar_path: $avatar_path,
                created_at: $created_at
            })",
        )
        .param("id", user.id().to_string())
        .param("username", user.username().as_str())
        .param("email", user.email().as_str())
        .param("credential_hash", user.credential_hash())
        .param("avatar_path", opt_str(user.avatar_path()))
        .param("created_at", user.created_at().to_rfc3339());

        self.graph.run(q).await.map_err(|e| {
            if is_constraint_violation(&e) {
                RepoError::constraint(format!(
                    "username '{}' or email '{}' is already registered",
                    user.username(),
                    user.email()
                ))
            } else {
                RepoError::database("create_user", e)
            }
        })?;

        tracing::debug!(user_id = %user.id(), "Registered user");
        Ok(())
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let q = query("MATCH (u:User {id: $id}) RETURN u").param("id", id.to_string());
        self.find_one("get_user", q).await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, RepoError> {
        let q = query("MATCH (u:User {username: $username}) RETURN u")
            .param("username", username.as_str());
        self.find_one("find_user_by_username", q).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepoError> {
        let q = query("MATCH (u:User {email: $email}) RETURN u").param("email", email.as_str());
        self.find_one("find_user_by_email", q).await
    }
}

fn row_to_user(row: Row) -> Result<User, RepoError> {
    let node: Node = row_node(&row, "u")?;
    let id: UserId = parse_typed_id(&node, "id")?;
    let username = Username::new(node.get_string_strict("username")?)
        .map_err(|e| RepoError::database("parse", e))?;
    let email =
        Email::new(node.get_string_strict("email")?).map_err(|e| RepoError::database("parse", e))?;
    let credential_hash = node.get_optional_string("credential_hash").unwrap_or_default();
    let created_at = node.get_datetime_strict("created_at")?;

    let mut user = User::new(username, email, credential_hash, created_at).with_id(id);
    if let Some(path) = node.get_optional_string("avatar_path") {
        user = user.with_avatar_path(path);
    }
    Ok(user)
}
