use thiserror::Error;

/// Structured failures surfaced by the approval engine and the period
/// lifecycle manager. Everything except `Database` carries a message that
/// is safe to show to the caller.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Entity or period absent.
    #[error("{0}")]
    NotFound(String),

    /// Operation not valid for the current status (re-deciding a terminal
    /// entity, activating an archived period, closing an inactive period).
    #[error("{0}")]
    InvalidState(String),

    /// Duplicate code or duplicate membership.
    #[error("{0}")]
    Conflict(String),

    /// Permission hook rejection.
    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
