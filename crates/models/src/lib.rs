pub mod errors;
pub mod password_card;

pub use password_card::{PasswordCard, PasswordCardInput};
