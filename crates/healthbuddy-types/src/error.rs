use thiserror::Error;

/// Errors from repository operations (used by trait definitions in healthbuddy-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from loading the translation document.
///
/// Both variants are recovered locally by substituting the built-in
/// English catalog; neither is ever surfaced to the user as an error.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation source unreachable: {0}")]
    Unreachable(String),

    #[error("translation source malformed: {0}")]
    Malformed(String),
}

/// Error from the remote reply delegate.
///
/// Every failure mode (transport, non-success status, unparsable or
/// empty payload, timeout) classifies uniformly as `Unavailable` and
/// is recovered via the local matcher.
#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("remote reply service unavailable: {reason}")]
    Unavailable { reason: String },
}

impl DelegateError {
    /// Build an `Unavailable` from any displayable cause.
    pub fn unavailable(reason: impl std::fmt::Display) -> Self {
        DelegateError::Unavailable {
            reason: reason.to_string(),
        }
    }
}

/// Errors from the chat controller.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A submit is already pending for this session.
    #[error("a submission is already in flight for this session")]
    SubmissionInFlight,

    #[error("session not found")]
    SessionNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
