use std::sync::Arc;

use models::PasswordCard;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::password_card::repository::PasswordCardRepository;

/// Application service for password cards.
/// Validates input before it reaches the repository and wraps store failures with context.
pub struct PasswordCardService<R: PasswordCardRepository> {
    repo: Arc<R>,
}

impl<R: PasswordCardRepository> PasswordCardService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip_all, fields(id = %card.id))]
    pub fn create(&self, card: PasswordCard) -> Result<PasswordCard, ServiceError> {
        card.validate()?;
        self.repo
            .insert(card.clone())
            .map_err(|e| ServiceError::store("error creating a new password card", e))?;
        info!("password_card_created");
        Ok(card)
    }

    pub fn list(&self) -> Result<Vec<PasswordCard>, ServiceError> {
        self.repo
            .list()
            .map_err(|e| ServiceError::store("error listing password cards", e))
    }

    /// Replace the whole card identified by `card.id`.
    #[instrument(skip_all, fields(id = %card.id))]
    pub fn update(&self, card: PasswordCard) -> Result<PasswordCard, ServiceError> {
        card.validate()?;
        self.repo
            .update(card.clone())
            .map_err(|e| ServiceError::store("error updating password card", e))?;
        info!("password_card_updated");
        Ok(card)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.repo
            .delete(id)
            .map_err(|e| ServiceError::store("error deleting password card", e))?;
        info!("password_card_deleted");
        Ok(())
    }
}
