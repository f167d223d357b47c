use std::cell::Cell;

use serde::{Deserialize, Serialize};
use url::{SyntaxViolation, Url};

use crate::errors::ModelError;

/// One stored credential.
///
/// `id` is supplied by the caller and never changes once the card is stored;
/// updates replace the whole record matched on it. Missing JSON fields
/// decode as empty strings so `validate` can name the offending field.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PasswordCard {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub url: String,
}

/// Update payload: the id comes from the request path.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PasswordCardInput {
    pub name: String,
    pub username: String,
    pub password: String,
    pub url: String,
}

impl PasswordCardInput {
    pub fn into_card(self, id: impl Into<String>) -> PasswordCard {
        PasswordCard {
            id: id.into(),
            name: self.name,
            username: self.username,
            password: self.password,
            url: self.url,
        }
    }
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

// Scheme-less input such as `aws.com/login` resolves against this base.
const PLACEHOLDER_BASE: &str = "http://placeholder.invalid/";

fn invalid_url(reason: impl std::fmt::Display) -> ModelError {
    ModelError::Validation(format!("invalid URL provided: {reason}"))
}

/// Accept absolute and relative references; reject control characters,
/// broken `%` escapes and anything the parser refuses (e.g. a bad host).
fn check_url(raw: &str) -> Result<(), ModelError> {
    if raw.chars().any(|c| c.is_ascii_control()) {
        return Err(invalid_url("invalid control character in URL"));
    }
    let base = Url::parse(PLACEHOLDER_BASE).map_err(invalid_url)?;
    let bad_escape = Cell::new(false);
    let on_violation = |v: SyntaxViolation| {
        if v == SyntaxViolation::PercentDecode {
            bad_escape.set(true);
        }
    };
    Url::options()
        .base_url(Some(&base))
        .syntax_violation_callback(Some(&on_violation))
        .parse(raw)
        .map_err(invalid_url)?;
    if bad_escape.get() {
        return Err(invalid_url(SyntaxViolation::PercentDecode.description()));
    }
    Ok(())
}

impl PasswordCard {
    /// Reject blank fields and URLs that do not parse. First failure wins.
    pub fn validate(&self) -> Result<(), ModelError> {
        if blank(&self.id) {
            return Err(ModelError::Validation("invalid id".into()));
        }
        if blank(&self.name) {
            return Err(ModelError::Validation("invalid name".into()));
        }
        if blank(&self.username) {
            return Err(ModelError::Validation("username can't be empty".into()));
        }
        if blank(&self.password) {
            return Err(ModelError::Validation("password can't be empty".into()));
        }
        if blank(&self.url) {
            return Err(ModelError::Validation("invalid URL".into()));
        }
        check_url(&self.url)
    }
}
