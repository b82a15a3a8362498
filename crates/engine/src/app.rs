//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::neo4j::Neo4jRepositories;
use crate::infrastructure::ports::{CharacterRepo, ClockPort, MonsterRepo, OwnershipRepo, UserRepo};
use crate::use_cases;

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Port traits the use cases are built from.
#[derive(Clone)]
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub ownership: Arc<dyn OwnershipRepo>,
    pub monster: Arc<dyn MonsterRepo>,
    pub user: Arc<dyn UserRepo>,
}

impl From<Neo4jRepositories> for Repositories {
    fn from(repos: Neo4jRepositories) -> Self {
        Self {
            character: repos.character,
            ownership: repos.ownership,
            monster: repos.monster,
            user: repos.user,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub characters: use_cases::CharacterManagement,
    pub monsters: use_cases::MonsterManagement,
    pub users: use_cases::UserManagement,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repositories: Repositories, clock: Arc<dyn ClockPort>) -> Self {
        let use_cases = UseCases {
            characters: use_cases::CharacterManagement::new(
                repositories.character,
                repositories.ownership,
                clock.clone(),
            ),
            monsters: use_cases::MonsterManagement::new(repositories.monster, clock.clone()),
            users: use_cases::UserManagement::new(repositories.user, clock),
        };

        Self { use_cases }
    }
}
