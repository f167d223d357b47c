use std::sync::Arc;

use service::password_card::{InMemoryPasswordCardRepository, PasswordCardService};

pub type CardService = PasswordCardService<InMemoryPasswordCardRepository>;

#[derive(Clone)]
pub struct AppState {
    pub cards: Arc<CardService>,
}

impl AppState {
    pub fn new(repo: InMemoryPasswordCardRepository) -> Self {
        Self { cards: Arc::new(PasswordCardService::new(Arc::new(repo))) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(InMemoryPasswordCardRepository::new())
    }
}
