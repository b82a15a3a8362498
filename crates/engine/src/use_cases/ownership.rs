//! Ownership gate: every privileged character operation passes through here.

use std::sync::Arc;

use herobook_domain::{CharacterId, UserId};

use crate::infrastructure::ports::OwnershipRepo;
use crate::use_cases::characters::CharacterError;

/// Checks the `OWNS_CHARACTER` edge before any load or write.
///
/// Checked on every call with no caching, so a deleted edge takes effect
/// immediately.
pub struct OwnershipGate {
    ownership: Arc<dyn OwnershipRepo>,
}

impl OwnershipGate {
    pub fn new(ownership: Arc<dyn OwnershipRepo>) -> Self {
        Self { ownership }
    }

    /// `Forbidden` unless `user_id` owns `character_id`, including when the
    /// character does not exist.
    pub async fn authorize(
        &self,
        character_id: CharacterId,
        user_id: UserId,
    ) -> Result<(), CharacterError> {
        if self.ownership.is_owner(character_id, user_id).await? {
            Ok(())
        } else {
            tracing::debug!(%character_id, %user_id, "Ownership check failed");
            Err(CharacterError::Forbidden(character_id))
        }
    }
}
