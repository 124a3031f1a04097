//! The static route table.
//!
//! Every navigable path is declared once in [`ROUTES`]. Lookups are exact
//! after normalization; anything unknown falls back to the root path.

use std::collections::HashSet;
use std::fmt;

use crate::role::Role::{Admin, Employee, Manager};
use crate::role::{Role, RoleSet};

/// The views the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Marketing landing page
    Landing,
    /// Workforce management product page
    WorkforceProduct,
    /// HR management product page
    HrManagementProduct,
    /// About page
    About,
    /// Contact page
    Contact,
    /// Login form
    Login,
    /// Role-aware dashboard home
    Dashboard,
    /// Own profile
    Profile,
    /// Own shifts
    Shifts,
    /// Own leave requests
    LeaveRequests,
    /// Own attendance and clock-in/out
    Attendance,
    /// Own payslips
    Payslips,
    /// Shift swap requests
    ShiftSwaps,
    /// Employee directory management
    EmployeeManagement,
    /// Pending approvals
    Approvals,
    /// Notifications inbox
    Notifications,
    /// Payroll overview
    Payroll,
    /// Reports
    Reports,
    /// Attendance across the team
    TeamAttendance,
    /// Shift planning
    ShiftManagement,
    /// System settings
    Settings,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a route is framed and whether it needs a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Public page with the top navbar
    Public,
    /// Public page without chrome (the login form)
    Bare,
    /// Dashboard shell; requires a session
    Protected,
}

impl Layout {
    /// True for layouts that require a session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Layout::Protected)
    }
}

/// A navigable path with its view, role set and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Absolute path
    pub path: &'static str,
    /// View rendered at the path
    pub view: View,
    /// Roles admitted; empty admits any authenticated identity
    pub roles: RoleSet,
    /// Framing and protection
    pub layout: Layout,
}

impl RouteDescriptor {
    const fn public(path: &'static str, view: View) -> Self {
        Self {
            path,
            view,
            roles: RoleSet::ANY,
            layout: Layout::Public,
        }
    }

    const fn protected(path: &'static str, view: View, roles: &[Role]) -> Self {
        Self {
            path,
            view,
            roles: RoleSet::of(roles),
            layout: Layout::Protected,
        }
    }
}

/// Every route the dashboard knows.
pub static ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::public("/", View::Landing),
    RouteDescriptor::public("/products/workforce-management", View::WorkforceProduct),
    RouteDescriptor::public("/products/hr-management", View::HrManagementProduct),
    RouteDescriptor::public("/about", View::About),
    RouteDescriptor::public("/contact", View::Contact),
    RouteDescriptor {
        path: "/login",
        view: View::Login,
        roles: RoleSet::ANY,
        layout: Layout::Bare,
    },
    RouteDescriptor::protected("/dashboard", View::Dashboard, &[]),
    RouteDescriptor::protected("/dashboard/profile", View::Profile, &[]),
    RouteDescriptor::protected("/dashboard/shifts", View::Shifts, &[Employee]),
    RouteDescriptor::protected("/dashboard/leave-requests", View::LeaveRequests, &[Employee]),
    RouteDescriptor::protected("/dashboard/attendance", View::Attendance, &[Employee]),
    RouteDescriptor::protected("/dashboard/payslips", View::Payslips, &[Employee]),
    RouteDescriptor::protected("/dashboard/shift-swaps", View::ShiftSwaps, &[Employee]),
    RouteDescriptor::protected("/dashboard/employees", View::EmployeeManagement, &[Admin]),
    RouteDescriptor::protected("/dashboard/approvals", View::Approvals, &[Manager, Admin]),
    RouteDescriptor::protected("/dashboard/notifications", View::Notifications, &[]),
    RouteDescriptor::protected("/dashboard/payroll", View::Payroll, &[Manager, Admin]),
    RouteDescriptor::protected("/dashboard/reports", View::Reports, &[Manager, Admin]),
    RouteDescriptor::protected("/dashboard/team-attendance", View::TeamAttendance, &[Admin]),
    RouteDescriptor::protected("/dashboard/shift-management", View::ShiftManagement, &[Admin]),
    RouteDescriptor::protected("/dashboard/settings", View::Settings, &[Admin]),
];

/// Result of looking a path up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The path names a route
    Matched(&'a RouteDescriptor),
    /// Unknown path; redirect to the root
    Fallback,
}

/// Problems found by [`RouteTable::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Two routes share a path
    #[error("duplicate route '{0}'")]
    Duplicate(&'static str),
    /// A path is not absolute or not in normal form
    #[error("route path '{0}' is not normalized")]
    NotNormalized(&'static str),
}

/// Lookup over a fixed slice of routes.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDescriptor],
}

impl RouteTable {
    /// Table over a custom route list.
    pub const fn new(routes: &'static [RouteDescriptor]) -> Self {
        Self { routes }
    }

    /// Resolves `path` after [normalizing](normalize_path) it.
    pub fn resolve(&self, path: &str) -> Resolution<'static> {
        let path = normalize_path(path);
        match self.routes.iter().find(|r| r.path == path) {
            Some(route) => Resolution::Matched(route),
            None => Resolution::Fallback,
        }
    }

    /// Looks up a route by view.
    pub fn route_for(&self, view: View) -> Option<&'static RouteDescriptor> {
        self.routes.iter().find(|r| r.view == view)
    }

    /// All routes in declaration order.
    pub fn routes(&self) -> &'static [RouteDescriptor] {
        self.routes
    }

    /// Checks that paths are absolute, unique and already normalized.
    pub fn validate(&self) -> Result<(), TableError> {
        let mut seen = HashSet::new();
        for route in self.routes {
            if !route.path.starts_with('/') || normalize_path(route.path) != route.path {
                return Err(TableError::NotNormalized(route.path));
            }
            if !seen.insert(route.path) {
                return Err(TableError::Duplicate(route.path));
            }
        }
        Ok(())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(ROUTES)
    }
}

/// Reduces a location to the path used for route lookup.
///
/// Drops any query string or fragment, removes a trailing slash (except on
/// the root) and maps an empty path to `/`.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
