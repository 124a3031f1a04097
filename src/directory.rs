//! Credential directory.
//!
//! The session store asks an [`Authenticator`] to turn submitted credentials
//! into an [`Identity`]. [`MockDirectory`] is the fixed three-user directory
//! the dashboard ships with; a real deployment would put an external
//! authentication service behind the same trait.

use crate::identity::Identity;
use crate::role::Role;
use crate::secret::Secret;

/// Shared password of every account in [`MockDirectory`].
pub const MOCK_PASSWORD: &str = "password123";

/// Resolves credentials to an identity.
pub trait Authenticator {
    /// Returns the identity matching both `email` and `secret` exactly, or
    /// `None` when either does not match.
    fn authenticate(&self, email: &str, secret: &Secret<String>) -> Option<Identity>;
}

struct Account {
    identity: Identity,
    secret: Secret<String>,
}

/// In-memory directory of fixed accounts.
pub struct MockDirectory {
    accounts: Vec<Account>,
}

impl MockDirectory {
    /// The stock directory: one admin, one manager and one employee, all
    /// sharing [`MOCK_PASSWORD`].
    pub fn new() -> Self {
        let accounts = [
            Identity::new("1", "admin@company.com", "Admin User", Role::Admin, "IT"),
            Identity::new("2", "manager@company.com", "Manager User", Role::Manager, "Sales"),
            Identity::new(
                "3",
                "employee@company.com",
                "Employee User",
                Role::Employee,
                "Marketing",
            ),
        ]
        .into_iter()
        .map(|identity| Account {
            identity,
            secret: Secret::from(MOCK_PASSWORD),
        })
        .collect();

        Self { accounts }
    }

    /// Returns the identities in the directory, in declaration order.
    pub fn identities(&self) -> impl Iterator<Item = &Identity> {
        self.accounts.iter().map(|a| &a.identity)
    }
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Authenticator for MockDirectory {
    fn authenticate(&self, email: &str, secret: &Secret<String>) -> Option<Identity> {
        self.accounts
            .iter()
            .find(|a| a.identity.email == email && a.secret.matches(secret.expose_secret()))
            .map(|a| a.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_holds_one_account_per_role() {
        let directory = MockDirectory::new();
        let roles: Vec<Role> = directory.identities().map(|i| i.role).collect();
        assert_eq!(roles, vec![Role::Admin, Role::Manager, Role::Employee]);
    }

    #[test]
    fn authenticate_matches_email_and_secret() {
        let directory = MockDirectory::new();
        let identity = directory
            .authenticate("employee@company.com", &Secret::from(MOCK_PASSWORD))
            .expect("known account");

        assert_eq!(identity.id, "3");
        assert_eq!(identity.name, "Employee User");
        assert_eq!(identity.role, Role::Employee);
        assert_eq!(identity.department, "Marketing");
    }

    #[test]
    fn authenticate_rejects_wrong_secret() {
        let directory = MockDirectory::new();
        assert!(directory
            .authenticate("admin@company.com", &Secret::from("letmein"))
            .is_none());
    }

    #[test]
    fn authenticate_rejects_unknown_email() {
        let directory = MockDirectory::new();
        assert!(directory
            .authenticate("ceo@company.com", &Secret::from(MOCK_PASSWORD))
            .is_none());
    }

    #[test]
    fn email_match_is_exact() {
        let directory = MockDirectory::new();
        assert!(directory
            .authenticate("Admin@Company.com", &Secret::from(MOCK_PASSWORD))
            .is_none());
        assert!(directory
            .authenticate(" admin@company.com", &Secret::from(MOCK_PASSWORD))
            .is_none());
    }
}
