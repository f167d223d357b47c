use models::PasswordCard;

use crate::errors::StoreError;

/// Storage contract for password cards.
///
/// Implementations must keep `id` and `url` unique across all cards and
/// keep insertion order for `list`. Each mutation is atomic with respect to
/// every other mutation on the same repository.
pub trait PasswordCardRepository: Send + Sync {
    /// Append a card. An `id` collision is reported before a `url` collision.
    fn insert(&self, card: PasswordCard) -> Result<(), StoreError>;
    /// Replace the card with the same `id` in place. A `url` owned by a
    /// different card is reported before checking that the target exists.
    fn update(&self, card: PasswordCard) -> Result<(), StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<PasswordCard>, StoreError>;
}
