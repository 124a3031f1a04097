//! Roles and role sets.
//!
//! Roles form a closed set of three variants. A [`RoleSet`] can only be built
//! from [`Role`] values, so any non-empty set is a subset of the three roles
//! by construction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The role an identity holds.
///
/// Serialized in lowercase (`"employee"`, `"manager"`, `"admin"`), which is
/// also the format of the persisted session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular staff member
    Employee,
    /// Team manager
    Manager,
    /// System administrator
    Admin,
}

impl Role {
    /// All roles, in ascending order of privilege.
    pub const ALL: [Role; 3] = [Role::Employee, Role::Manager, Role::Admin];

    /// Returns the lowercase wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name one of the three roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// An ordered, duplicate-free set of roles.
///
/// The empty set means "any authenticated identity" when attached to a
/// protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSet {
    // Indexed by `Role as usize`; order of iteration is the declaration order.
    members: [bool; 3],
}

impl RoleSet {
    /// The empty set.
    pub const ANY: RoleSet = RoleSet {
        members: [false; 3],
    };

    /// Builds a set from a slice of roles. Duplicates collapse.
    pub const fn of(roles: &[Role]) -> Self {
        let mut members = [false; 3];
        let mut i = 0;
        while i < roles.len() {
            members[roles[i] as usize] = true;
            i += 1;
        }
        Self { members }
    }

    /// Returns true if the set names no role.
    pub fn is_empty(&self) -> bool {
        !self.members.iter().any(|m| *m)
    }

    /// Returns true if `role` is a member.
    pub fn contains(&self, role: Role) -> bool {
        self.members[role as usize]
    }

    /// Number of member roles.
    pub fn len(&self) -> usize {
        self.members.iter().filter(|m| **m).count()
    }

    /// Iterates over member roles in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut members = [false; 3];
        for role in iter {
            members[role as usize] = true;
        }
        Self { members }
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("any");
        }
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}
