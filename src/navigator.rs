//! Route dispatcher.
//!
//! [`Navigator`] drives the table-driven flow: resolve the path, ask the
//! access policy, follow redirects until a route admits the session, then
//! derive the menu for the page that was reached.

use tracing::debug;

use crate::config::AppConfig;
use crate::directory::Authenticator;
use crate::error::{Denial, Error};
use crate::nav::{MenuItem, menu_for};
use crate::policy::{Decision, evaluate};
use crate::routes::{Resolution, RouteDescriptor, RouteTable};
use crate::secret::Secret;
use crate::session::SessionStore;
use crate::storage::SessionStorage;

/// Upper bound on redirects followed by a single navigation.
pub const MAX_REDIRECTS: usize = 8;

/// Why a navigation step was redirected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectReason {
    /// The path is not in the route table
    UnknownPath,
    /// The access policy refused entry
    Denied(Denial),
}

/// One redirect hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Path that was requested
    pub from: String,
    /// Path navigation continued with
    pub to: String,
    /// Why
    pub reason: RedirectReason,
}

/// Where a navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landing {
    /// Route that was entered
    pub route: &'static RouteDescriptor,
    /// Hops taken to get there, in order; empty when the request was admitted
    /// directly
    pub redirects: Vec<Redirect>,
    /// Sidebar for protected layouts, empty otherwise
    pub menu: Vec<MenuItem>,
}

impl Landing {
    /// Path of the route that was entered.
    pub fn path(&self) -> &'static str {
        self.route.path
    }

    /// True if at least one redirect happened.
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Session-aware dispatcher over a route table.
///
/// # Examples
///
/// ```
/// use workforce_access::{
///     AppConfig, MemoryStorage, MockDirectory, Navigator, RouteTable, Secret,
///     SessionStore, View,
/// };
///
/// let session = SessionStore::new(MockDirectory::new(), MemoryStorage::new(), "user");
/// let mut nav = Navigator::new(session, RouteTable::default(), AppConfig::default());
///
/// let landing = nav.navigate("/dashboard/payroll").unwrap();
/// assert_eq!(landing.route.view, View::Login);
///
/// nav.login("manager@company.com", &Secret::from("password123")).unwrap();
/// let landing = nav.navigate("/dashboard/payroll").unwrap();
/// assert_eq!(landing.route.view, View::Payroll);
/// ```
pub struct Navigator<A, S> {
    session: SessionStore<A, S>,
    table: RouteTable,
    config: AppConfig,
    history: Vec<&'static str>,
}

impl<A, S> Navigator<A, S>
where
    A: Authenticator,
    S: SessionStorage,
{
    /// Creates a navigator with empty history.
    pub fn new(session: SessionStore<A, S>, table: RouteTable, config: AppConfig) -> Self {
        Self {
            session,
            table,
            config,
            history: Vec::new(),
        }
    }

    /// Navigates to `path`, following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RedirectLoop`] when more than [`MAX_REDIRECTS`] hops
    /// are needed, which only happens with a misconfigured table or
    /// configuration.
    pub fn navigate(&mut self, path: &str) -> Result<Landing, Error> {
        let mut target = path.to_string();
        let mut redirects = Vec::new();

        let route = loop {
            if redirects.len() > MAX_REDIRECTS {
                return Err(Error::RedirectLoop {
                    path: path.to_string(),
                });
            }

            let route = match self.table.resolve(&target) {
                Resolution::Matched(route) => route,
                Resolution::Fallback => {
                    let to = self.config.root_path.clone();
                    debug!(from = %target, to = %to, "unknown path");
                    redirects.push(Redirect {
                        from: std::mem::replace(&mut target, to.clone()),
                        to,
                        reason: RedirectReason::UnknownPath,
                    });
                    continue;
                }
            };

            let identity = self.session.current();
            let decision = evaluate(identity, route);
            let to = match decision {
                Decision::Allow => break route,
                Decision::RedirectToLogin => self.config.login_path.clone(),
                Decision::RedirectToDefault => self.config.landing_path.clone(),
            };
            // Allow was handled above, so a denial is always present.
            let denial = decision
                .denial(identity, route)
                .unwrap_or(Denial::Unauthenticated);
            debug!(from = %route.path, to = %to, reason = %denial, "access redirected");
            redirects.push(Redirect {
                from: std::mem::replace(&mut target, to.clone()),
                to,
                reason: RedirectReason::Denied(denial),
            });
        };

        let menu = if route.layout.is_protected() {
            menu_for(self.session.current(), route.path)
        } else {
            Vec::new()
        };

        if self.history.last() != Some(&route.path) {
            self.history.push(route.path);
        }
        debug!(path = %route.path, view = %route.view, hops = redirects.len(), "navigated");

        Ok(Landing {
            route,
            redirects,
            menu,
        })
    }

    /// Returns to the previous page, or to the root when there is none.
    pub fn back(&mut self) -> Result<Landing, Error> {
        self.history.pop();
        match self.history.pop() {
            Some(previous) => self.navigate(previous),
            None => {
                let root = self.config.root_path.clone();
                self.navigate(&root)
            }
        }
    }

    /// Logs in and moves to the landing page.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCredentials`] when the login is rejected; nothing is
    /// navigated in that case.
    pub fn login(&mut self, email: &str, secret: &Secret<String>) -> Result<Landing, Error> {
        self.session.login(email, secret)?;
        let landing = self.config.landing_path.clone();
        self.navigate(&landing)
    }

    /// Logs out and moves to the root page.
    pub fn logout(&mut self) -> Result<Landing, Error> {
        self.session.logout();
        let root = self.config.root_path.clone();
        self.navigate(&root)
    }

    /// Path of the page currently shown, if any navigation happened.
    pub fn current_path(&self) -> Option<&'static str> {
        self.history.last().copied()
    }

    /// Visited paths, oldest first.
    pub fn history(&self) -> &[&'static str] {
        &self.history
    }

    /// The session store, read-only.
    pub fn session(&self) -> &SessionStore<A, S> {
        &self.session
    }

    /// The route table in use.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Ends navigation and hands back the session store.
    pub fn into_session(self) -> SessionStore<A, S> {
        self.session
    }
}
