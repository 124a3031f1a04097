//! Session, access policy and navigation core of the WorkForce Pro dashboard.
//!
//! This crate decides who is logged in, which dashboard routes they may
//! enter and which menu entries they see:
//! - **Session store**: the single owner of the logged-in [`Identity`],
//!   mirrored to durable [`SessionStorage`]
//! - **Access policy**: a pure [`evaluate`] over an identity and a route
//! - **Route table**: the static, data-driven list of [`RouteDescriptor`]s
//! - **Navigation shell**: role-filtered sidebar ([`menu_for`]) and top navbar
//! - **Navigator**: dispatcher that follows redirects and keeps history
//!
//! # Core Types
//!
//! - [`Role`] / [`RoleSet`]: the closed set of roles
//! - [`SessionStore`]: login, logout, restore
//! - [`Decision`]: allow or redirect, never "forbidden"
//! - [`Navigator`]: table-driven navigation over a session
//!
//! # Examples
//!
//! ```
//! use workforce_access::{
//!     AppConfig, MemoryStorage, MockDirectory, Navigator, RouteTable, Secret,
//!     SessionStore, View,
//! };
//!
//! let session = SessionStore::open(MockDirectory::new(), MemoryStorage::new(), "user");
//! let mut nav = Navigator::new(session, RouteTable::default(), AppConfig::default());
//!
//! nav.login("admin@company.com", &Secret::from("password123"))
//!     .expect("valid credentials");
//!
//! // Admins manage employees...
//! assert_eq!(nav.navigate("/dashboard/employees").unwrap().route.view, View::EmployeeManagement);
//! // ...but employee-only pages send them back to the dashboard.
//! assert_eq!(nav.navigate("/dashboard/shifts").unwrap().route.view, View::Dashboard);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod directory;
mod error;
mod identity;
mod nav;
mod navigator;
mod policy;
mod role;
mod routes;
mod secret;
mod session;
mod storage;

pub use config::{AppConfig, CONFIG_ENV, STORAGE_DIR_ENV};
pub use directory::{Authenticator, MOCK_PASSWORD, MockDirectory};
pub use error::{Denial, Error, StorageError};
pub use identity::Identity;
pub use nav::{
    AccountAction, DASHBOARD_PATH, Icon, MENU, MenuEntry, MenuItem, NavGroup, NavLink,
    account_action, is_active, menu_for, public_links,
};
pub use navigator::{Landing, MAX_REDIRECTS, Navigator, Redirect, RedirectReason};
pub use policy::{Decision, evaluate};
pub use role::{Role, RoleSet, UnknownRole};
pub use routes::{
    Layout, ROUTES, Resolution, RouteDescriptor, RouteTable, TableError, View, normalize_path,
};
pub use secret::Secret;
pub use session::{DEFAULT_SESSION_KEY, SessionState, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, is_valid_key};
