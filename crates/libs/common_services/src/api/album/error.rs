use crate::database::DbError;
use color_eyre::eyre;
use http::StatusCode;
use thiserror::Error;
use tracing::warn;

/// Typed failure of every sharing operation.
///
/// `NotFound` and `AccessDenied` stay distinct so a client can tell "does not exist" from
/// "exists but not for you". Public endpoints collapse both into `NotFound`.
#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invite has expired: {0}")]
    Expired(String),

    #[error("Invite has been revoked: {0}")]
    Revoked(String),
}

impl AlbumError {
    /// The status the HTTP layer should answer with.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AccessDenied(_) => StatusCode::FORBIDDEN,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Expired(_) | Self::Revoked(_) => StatusCode::GONE,
        }
    }

    /// Message safe to show to the caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) => "A database error occurred.".to_owned(),
            Self::Internal(_) => "An unexpected internal error occurred.".to_owned(),
            other => other.to_string(),
        }
    }

    pub fn log(&self) {
        match self {
            Self::Database(e) => warn!("Database query failed: {}", e),
            Self::Internal(e) => warn!("Internal error: {:?}", e),
            Self::NotFound(message) => warn!("Album -> Not found: {}", message),
            Self::AccessDenied(message) => warn!("Album -> Access denied: {}", message),
            Self::InvalidArgument(message) => warn!("Album -> Invalid argument: {}", message),
            Self::Expired(message) => warn!("Invite expired: {}", message),
            Self::Revoked(message) => warn!("Invite revoked: {}", message),
        }
    }
}

impl From<tokio::task::JoinError> for AlbumError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}
