use crate::error::Denial;
use crate::identity::Identity;
use crate::routes::RouteDescriptor;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Enter the route
    Allow,
    /// No session; go to the login view
    RedirectToLogin,
    /// Session lacks the role; go to the default landing view
    RedirectToDefault,
}

impl Decision {
    /// True for [`Decision::Allow`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Why a redirect happened, for logging. `None` for [`Decision::Allow`].
    pub fn denial(&self, identity: Option<&Identity>, route: &RouteDescriptor) -> Option<Denial> {
        match (self, identity) {
            (Decision::Allow, _) => None,
            (Decision::RedirectToLogin, _) | (Decision::RedirectToDefault, None) => {
                Some(Denial::Unauthenticated)
            }
            (Decision::RedirectToDefault, Some(identity)) => Some(Denial::Unauthorized {
                role: identity.role,
                path: route.path,
            }),
        }
    }
}

/// Decides whether `identity` may enter `route`.
///
/// Public and bare routes always allow. A protected route sends an anonymous
/// visitor to login, admits any identity when its role set is empty, and
/// otherwise admits only member roles; everyone else is sent to the default
/// landing view rather than shown a "forbidden" page.
///
/// # Examples
///
/// ```
/// use workforce_access::{Decision, Identity, Resolution, Role, RouteTable, evaluate};
///
/// let table = RouteTable::default();
/// let Resolution::Matched(shifts) = table.resolve("/dashboard/shifts") else { unreachable!() };
///
/// let admin = Identity::new("1", "admin@company.com", "Admin User", Role::Admin, "IT");
/// assert_eq!(evaluate(Some(&admin), shifts), Decision::RedirectToDefault);
/// assert_eq!(evaluate(None, shifts), Decision::RedirectToLogin);
/// ```
pub fn evaluate(identity: Option<&Identity>, route: &RouteDescriptor) -> Decision {
    if !route.layout.is_protected() {
        return Decision::Allow;
    }
    let Some(identity) = identity else {
        return Decision::RedirectToLogin;
    };
    if route.roles.is_empty() || route.roles.contains(identity.role) {
        Decision::Allow
    } else {
        Decision::RedirectToDefault
    }
}
