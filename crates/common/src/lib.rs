//! Shared plumbing for the password manager crates: logging setup and
//! small response types used by more than one crate.

pub mod types;

pub mod utils {
    pub mod logging;
}
