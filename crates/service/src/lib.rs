//! Service layer for password cards.
//! - `password_card::repository` defines the storage contract.
//! - `password_card::memory` is the lock-guarded in-memory store.
//! - `password_card::service` validates and wraps store errors with context.

pub mod errors;
pub mod password_card;
