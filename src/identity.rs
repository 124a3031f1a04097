use serde::{Deserialize, Serialize};

use crate::role::Role;

/// An authenticated user.
///
/// Created at login from the credential directory and owned by the
/// [`SessionStore`](crate::SessionStore). The serialized form is the durable
/// session record: a flat JSON object with exactly these field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Directory identifier
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Role governing route and menu visibility
    pub role: Role,
    /// Department the user belongs to
    pub department: String,
}

impl Identity {
    /// Creates an identity from its parts.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
            department: department.into(),
        }
    }
}
