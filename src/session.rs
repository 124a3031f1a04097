//! The session store: single authority for who is logged in.

use tracing::{debug, info, warn};

use crate::directory::Authenticator;
use crate::error::{Error, StorageError};
use crate::identity::Identity;
use crate::role::Role;
use crate::secret::Secret;
use crate::storage::SessionStorage;

/// Default storage key of the session record.
pub const DEFAULT_SESSION_KEY: &str = "user";

/// Coarse session state.
///
/// ```text
/// Anonymous --login ok--> Authenticated(role) --logout--> Anonymous
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is logged in
    Anonymous,
    /// An identity with the given role is logged in
    Authenticated(Role),
}

/// Holds the current [`Identity`] and mirrors it to durable storage.
///
/// The store is an explicit service: create it with [`SessionStore::new`],
/// call [`restore`](Self::restore) once at start-up and pass it by reference
/// to whatever needs to read the session. It is the only writer of the
/// identity.
///
/// Storage failures never escape: a failed write leaves the session
/// in memory only, and an unreadable or malformed record restores as
/// "logged out".
///
/// # Examples
///
/// ```
/// use workforce_access::{MemoryStorage, MockDirectory, Role, Secret, SessionStore};
///
/// let mut session = SessionStore::new(MockDirectory::new(), MemoryStorage::new(), "user");
/// assert!(!session.is_authenticated());
///
/// let identity = session
///     .login("admin@company.com", &Secret::from("password123"))
///     .expect("valid credentials");
/// assert_eq!(identity.role, Role::Admin);
/// assert!(session.is_authenticated());
///
/// session.logout();
/// assert!(session.current().is_none());
/// ```
pub struct SessionStore<A, S> {
    directory: A,
    storage: S,
    key: String,
    current: Option<Identity>,
}

impl<A, S> SessionStore<A, S>
where
    A: Authenticator,
    S: SessionStorage,
{
    /// Creates an anonymous store. Nothing is read from storage until
    /// [`restore`](Self::restore) is called.
    pub fn new(directory: A, storage: S, key: impl Into<String>) -> Self {
        Self {
            directory,
            storage,
            key: key.into(),
            current: None,
        }
    }

    /// Creates a store and immediately restores any persisted session.
    pub fn open(directory: A, storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::new(directory, storage, key);
        store.restore();
        store
    }

    /// Adopts the identity persisted in storage, if there is a well-formed one.
    ///
    /// A missing record leaves the store anonymous. So does a record that does
    /// not parse as an [`Identity`] or a storage read failure; both are logged.
    pub fn restore(&mut self) -> Option<&Identity> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored session");
                self.current = None;
                return None;
            }
            Err(e) => {
                warn!(
                    key = %self.key,
                    error = %e,
                    "session storage unreadable, starting logged out"
                );
                self.current = None;
                return None;
            }
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                info!(user_id = %identity.id, role = %identity.role, "session restored");
                self.current = Some(identity);
            }
            Err(e) => {
                warn!(
                    key = %self.key,
                    error = %e,
                    "stored session is malformed, starting logged out"
                );
                self.current = None;
            }
        }
        self.current.as_ref()
    }

    /// Logs in with the given credentials.
    ///
    /// On success the identity becomes current and is written to storage;
    /// a failed write is logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] when the directory has no account
    /// matching both `email` and `secret`. The current session, if any, is
    /// left as it was.
    pub fn login(&mut self, email: &str, secret: &Secret<String>) -> Result<Identity, Error> {
        let Some(identity) = self.directory.authenticate(email, secret) else {
            info!(email = %email, "login rejected");
            return Err(Error::InvalidCredentials);
        };

        self.persist(&identity);
        info!(user_id = %identity.id, role = %identity.role, "login succeeded");
        self.current = Some(identity.clone());
        Ok(identity)
    }

    /// Clears the session in memory and in storage. Safe to call when already
    /// logged out.
    pub fn logout(&mut self) {
        if let Some(identity) = self.current.take() {
            info!(user_id = %identity.id, "logged out");
        }
        if let Err(e) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %e, "failed to remove stored session");
        }
    }

    /// The logged-in identity, if any.
    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// True when an identity is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The coarse session state.
    pub fn state(&self) -> SessionState {
        match &self.current {
            Some(identity) => SessionState::Authenticated(identity.role),
            None => SessionState::Anonymous,
        }
    }

    /// The storage key of the session record.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read access to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Ends the service and hands back its storage backend.
    ///
    /// The durable record is left in place so that the next
    /// [`open`](Self::open) picks it up.
    pub fn teardown(self) -> S {
        debug!(key = %self.key, "session store torn down");
        self.storage
    }

    fn persist(&mut self, identity: &Identity) {
        let written = serde_json::to_string(identity)
            .map_err(StorageError::from)
            .and_then(|encoded| self.storage.set(&self.key, &encoded));
        if let Err(e) = written {
            warn!(key = %self.key, error = %e, "failed to persist session");
        }
    }
}
