pub mod memory;
pub mod repository;
pub mod service;

pub use memory::InMemoryPasswordCardRepository;
pub use repository::PasswordCardRepository;
pub use service::PasswordCardService;
