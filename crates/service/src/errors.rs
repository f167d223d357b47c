use thiserror::Error;

/// Which unique field an insert or update collided on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    Id(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{}", conflict_message(.0))]
    AlreadyExists(Conflict),
    #[error("password with ID {id:?} not found")]
    NotFound { id: String },
    #[error("password card store lock poisoned")]
    Poisoned,
}

fn conflict_message(conflict: &Conflict) -> String {
    match conflict {
        Conflict::Id(id) => format!("password with ID {id:?} already exists"),
        Conflict::Url(url) => format!("password with URL {url:?} already exists"),
    }
}

impl StoreError {
    pub fn id_exists(id: impl Into<String>) -> Self {
        Self::AlreadyExists(Conflict::Id(id.into()))
    }

    pub fn url_exists(url: impl Into<String>) -> Self {
        Self::AlreadyExists(Conflict::Url(url.into()))
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

/// Error kinds the HTTP layer maps to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    AlreadyExists,
    NotFound,
    Internal,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] models::errors::ModelError),
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ServiceError {
    pub fn store(context: &'static str, source: StoreError) -> Self {
        Self::Store { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Store { source, .. } => match source {
                StoreError::AlreadyExists(_) => ErrorKind::AlreadyExists,
                StoreError::NotFound { .. } => ErrorKind::NotFound,
                StoreError::Poisoned => ErrorKind::Internal,
            },
        }
    }

    /// The underlying store error, if this failure came from the store.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}
