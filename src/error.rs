use std::fmt;
use std::io;

use crate::role::Role;

/// Errors surfaced by the crate.
///
/// Only [`Error::InvalidCredentials`] reaches a user during normal operation.
/// Storage failures are absorbed by the session store and only appear when a
/// storage backend is driven directly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Login lookup failed. Deliberately carries no field-level detail.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Durable storage could not be read or written
    #[error("session storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
    /// Redirects did not settle on a view
    #[error("redirect loop while resolving '{path}'")]
    RedirectLoop {
        /// The path navigation started from
        path: String,
    },
}

/// Failures of a [`SessionStorage`](crate::storage::SessionStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying I/O failed
    #[error("i/o: {0}")]
    Io(#[from] io::Error),
    /// A value could not be encoded or decoded
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The key cannot name a record in this backend
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Why a navigation was redirected.
///
/// Denials are never shown as an error page; they are logged and the user is
/// sent to the login or landing view instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// A protected route was requested with no session
    Unauthenticated,
    /// The session's role is not in the route's role set
    Unauthorized {
        /// Role of the current identity
        role: Role,
        /// Route that was refused
        path: &'static str,
    },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::Unauthenticated => write!(f, "Unauthenticated"),
            Denial::Unauthorized { role, path } => {
                write!(f, "Unauthorized: role '{}' may not enter '{}'", role, path)
            }
        }
    }
}
