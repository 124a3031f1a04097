//! Navigation shell: sidebar menu and top navbar.
//!
//! The menu is derived, never stored: it is recomputed from the session
//! snapshot and the current path on every navigation.

use crate::identity::Identity;
use crate::role::Role::{Admin, Employee, Manager};
use crate::role::{Role, RoleSet};
use crate::routes::normalize_path;

/// Icon shown next to a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// House
    Home,
    /// Calendar
    Calendar,
    /// Document
    FileText,
    /// Clock
    Clock,
    /// Dollar sign
    DollarSign,
    /// Circular arrows
    RotateCcw,
    /// Checked box
    CheckSquare,
    /// Bar chart
    BarChart,
    /// People
    Users,
    /// Gear
    Settings,
    /// Bell
    Bell,
}

/// A sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    /// Target path
    pub path: &'static str,
    /// Label shown to the user
    pub label: &'static str,
    /// Icon reference
    pub icon: Icon,
    /// Roles the entry is shown to
    pub roles: RoleSet,
}

const fn entry(path: &'static str, label: &'static str, icon: Icon, roles: &[Role]) -> MenuEntry {
    MenuEntry {
        path,
        label,
        icon,
        roles: RoleSet::of(roles),
    }
}

/// Path of the dashboard root entry, the only entry matched exactly.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The full sidebar, in display order.
// Team Attendance is listed for managers although its route admits admins
// only; managers following it land back on the dashboard.
pub static MENU: &[MenuEntry] = &[
    entry(DASHBOARD_PATH, "Dashboard", Icon::Home, &[Employee, Manager, Admin]),
    entry("/dashboard/shifts", "My Shifts", Icon::Calendar, &[Employee]),
    entry("/dashboard/leave-requests", "Leave Requests", Icon::FileText, &[Employee]),
    entry("/dashboard/attendance", "Attendance", Icon::Clock, &[Employee]),
    entry("/dashboard/payslips", "Payslips", Icon::DollarSign, &[Employee]),
    entry("/dashboard/shift-swaps", "Shift Swaps", Icon::RotateCcw, &[Employee]),
    entry("/dashboard/team-attendance", "Team Attendance", Icon::Clock, &[Manager, Admin]),
    entry("/dashboard/approvals", "Approvals", Icon::CheckSquare, &[Manager, Admin]),
    entry("/dashboard/payroll", "Payroll", Icon::DollarSign, &[Manager, Admin]),
    entry("/dashboard/reports", "Reports", Icon::BarChart, &[Manager, Admin]),
    entry("/dashboard/employees", "Employee Management", Icon::Users, &[Admin]),
    entry("/dashboard/shift-management", "Shift Management", Icon::Calendar, &[Admin]),
    entry("/dashboard/settings", "Settings", Icon::Settings, &[Admin]),
    entry("/dashboard/notifications", "Notifications", Icon::Bell, &[Employee, Manager, Admin]),
];

/// A visible sidebar entry and whether it is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    /// The entry
    pub entry: &'static MenuEntry,
    /// True when the entry matches the current path
    pub active: bool,
}

/// Returns true when `entry_path` should be highlighted at `current_path`.
///
/// The dashboard root matches only itself; every other entry also matches
/// its sub-paths.
pub fn is_active(entry_path: &str, current_path: &str) -> bool {
    if entry_path == DASHBOARD_PATH {
        current_path == DASHBOARD_PATH
    } else {
        current_path.starts_with(entry_path)
    }
}

/// Computes the sidebar for `identity` at `current_path`.
///
/// Without an identity the menu is empty. Otherwise entries whose role set
/// contains the identity's role are returned in display order. The current
/// path is [normalized](normalize_path) before the active entry is picked.
///
/// # Examples
///
/// ```
/// use workforce_access::{Identity, Role, menu_for};
///
/// let employee = Identity::new(
///     "3",
///     "employee@company.com",
///     "Employee User",
///     Role::Employee,
///     "Marketing",
/// );
/// let menu = menu_for(Some(&employee), "/dashboard/shifts");
///
/// assert!(menu.iter().any(|item| item.entry.label == "Notifications"));
/// assert!(menu.iter().all(|item| item.entry.label != "Payroll"));
/// let active = menu.iter().find(|item| item.active);
/// assert!(active.is_some_and(|item| item.entry.label == "My Shifts"));
/// ```
pub fn menu_for(identity: Option<&Identity>, current_path: &str) -> Vec<MenuItem> {
    let Some(identity) = identity else {
        return Vec::new();
    };
    let current_path = normalize_path(current_path);
    MENU.iter()
        .filter(|e| e.roles.contains(identity.role))
        .map(|e| MenuItem {
            entry: e,
            active: is_active(e.path, current_path),
        })
        .collect()
}

/// Grouping of a top navbar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavGroup {
    /// Top-level link
    Main,
    /// Listed under the "Products" dropdown
    Products,
}

/// A link in the public top navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Target path
    pub path: &'static str,
    /// Label
    pub label: &'static str,
    /// Where the link sits
    pub group: NavGroup,
}

static PUBLIC_LINKS: &[NavLink] = &[
    NavLink {
        path: "/",
        label: "Home",
        group: NavGroup::Main,
    },
    NavLink {
        path: "/products/workforce-management",
        label: "Workforce Management",
        group: NavGroup::Products,
    },
    NavLink {
        path: "/about",
        label: "About",
        group: NavGroup::Main,
    },
    NavLink {
        path: "/contact",
        label: "Contact",
        group: NavGroup::Main,
    },
];

/// Links of the public top navbar, in display order.
pub fn public_links() -> &'static [NavLink] {
    PUBLIC_LINKS
}

/// The account control at the right of the top navbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAction {
    /// Anonymous: link to the login view
    SignIn {
        /// Login path
        path: &'static str,
    },
    /// Logged in: show who, and offer sign out
    SignOut {
        /// Display name
        name: String,
        /// Role
        role: Role,
    },
}

/// Chooses the account control for the current session.
pub fn account_action(identity: Option<&Identity>) -> AccountAction {
    match identity {
        Some(identity) => AccountAction::SignOut {
            name: identity.name.clone(),
            role: identity.role,
        },
        None => AccountAction::SignIn { path: "/login" },
    }
}
