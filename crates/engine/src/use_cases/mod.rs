//! Use cases - user story orchestration over the repository ports.

pub mod characters;
pub mod monsters;
pub mod ownership;
pub mod users;

pub use characters::{CharacterError, CharacterManagement, CharacterUpdate, NewCharacter};
pub use monsters::{MonsterError, MonsterManagement, MonsterUpdate, NewMonster};
pub use ownership::OwnershipGate;
pub use users::{UserError, UserManagement};
