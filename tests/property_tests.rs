//! Property tests for the access core.
//!
//! These tests check the policy, session and menu invariants across
//! arbitrary roles, routes and credentials.

use proptest::prelude::*;
use workforce_access::{
    Decision, Identity, Layout, MENU, MOCK_PASSWORD, MemoryStorage, MockDirectory, ROUTES, Role,
    RoleSet, RouteDescriptor, Secret, SessionStore, View, evaluate, menu_for,
};

// Strategy: any role
fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Employee), Just(Role::Manager), Just(Role::Admin)]
}

// Strategy: any identity
fn arb_identity() -> impl Strategy<Value = Identity> {
    (
        prop::string::string_regex("[0-9]{1,4}").unwrap(),
        prop::string::string_regex("[a-z]{3,10}@company\\.com").unwrap(),
        prop::string::string_regex("[A-Za-z ]{3,15}").unwrap(),
        arb_role(),
        prop::string::string_regex("[A-Za-z]{2,12}").unwrap(),
    )
        .prop_map(|(id, email, name, role, department)| Identity {
            id,
            email,
            name,
            role,
            department,
        })
}

// Strategy: any role set, including the empty one
fn arb_role_set() -> impl Strategy<Value = RoleSet> {
    prop::collection::vec(arb_role(), 0..4).prop_map(|roles| roles.into_iter().collect())
}

// Strategy: one of the built-in routes
fn arb_route() -> impl Strategy<Value = &'static RouteDescriptor> {
    prop::sample::select(ROUTES.iter().collect::<Vec<_>>())
}

fn protected(roles: RoleSet) -> RouteDescriptor {
    RouteDescriptor {
        path: "/dashboard/generated",
        view: View::Reports,
        roles,
        layout: Layout::Protected,
    }
}

fn session() -> SessionStore<MockDirectory, MemoryStorage> {
    SessionStore::new(MockDirectory::new(), MemoryStorage::new(), "user")
}

fn account_email(role: Role) -> &'static str {
    match role {
        Role::Employee => "employee@company.com",
        Role::Manager => "manager@company.com",
        Role::Admin => "admin@company.com",
    }
}

proptest! {
    /// Property: with a non-empty role set, access is granted iff the role
    /// is a member
    #[test]
    fn proptest_role_set_membership_decides_access(
        identity in arb_identity(),
        roles in arb_role_set().prop_filter("non-empty", |s| !s.is_empty())
    ) {
        let route = protected(roles);
        let decision = evaluate(Some(&identity), &route);

        if roles.contains(identity.role) {
            prop_assert_eq!(decision, Decision::Allow);
        } else {
            prop_assert_eq!(decision, Decision::RedirectToDefault);
        }
    }

    /// Property: an empty role set admits any identity; no identity is always
    /// sent to login
    #[test]
    fn proptest_empty_role_set_and_anonymous_access(
        identity in arb_identity(),
        roles in arb_role_set()
    ) {
        prop_assert_eq!(evaluate(Some(&identity), &protected(RoleSet::ANY)), Decision::Allow);
        prop_assert_eq!(evaluate(None, &protected(roles)), Decision::RedirectToLogin);
    }

    /// Property: built-in routes never produce a forbidden page, only allow
    /// or one of the two redirects, and public routes always allow
    #[test]
    fn proptest_builtin_routes_decisions(
        identity in prop::option::of(arb_identity()),
        route in arb_route()
    ) {
        let decision = evaluate(identity.as_ref(), route);
        if !route.layout.is_protected() {
            prop_assert_eq!(decision, Decision::Allow);
        }
        match (&identity, decision) {
            (None, Decision::RedirectToDefault) => {
                return Err(TestCaseError::fail(
                    "anonymous visitor sent to landing instead of login",
                ));
            }
            (Some(_), Decision::RedirectToLogin) => {
                return Err(TestCaseError::fail("authenticated visitor sent to login"));
            }
            _ => {}
        }
    }

    /// Property: a rejected login never changes the current session
    #[test]
    fn proptest_failed_login_leaves_state_unchanged(
        prior in prop::option::of(arb_role()),
        email in prop::string::string_regex("[a-z]{1,10}@[a-z]{1,8}\\.com").unwrap(),
        password in prop::string::string_regex("[ -~]{0,16}").unwrap()
    ) {
        prop_assume!(password != MOCK_PASSWORD);

        let mut store = session();
        if let Some(role) = prior {
            store.login(account_email(role), &Secret::from(MOCK_PASSWORD)).unwrap();
        }
        let before = store.current().cloned();

        prop_assert!(store.login(&email, &Secret::new(password)).is_err());
        prop_assert_eq!(store.current().cloned(), before);
    }

    /// Property: logout always ends anonymous, however often it is called
    #[test]
    fn proptest_logout_is_idempotent(
        prior in prop::option::of(arb_role()),
        times in 1usize..4
    ) {
        let mut store = session();
        if let Some(role) = prior {
            store.login(account_email(role), &Secret::from(MOCK_PASSWORD)).unwrap();
        }
        for _ in 0..times {
            store.logout();
            prop_assert!(store.current().is_none());
        }
    }

    /// Property: restoring a record written by login reproduces the identity
    #[test]
    fn proptest_restore_reproduces_login_identity(role in arb_role()) {
        let mut first = session();
        let identity = first.login(account_email(role), &Secret::from(MOCK_PASSWORD)).unwrap();

        let restored = SessionStore::open(MockDirectory::new(), first.teardown(), "user");
        prop_assert_eq!(restored.current(), Some(&identity));
    }

    /// Property: the menu shows exactly the entries whose role set contains
    /// the identity's role, dashboard and notifications always included
    #[test]
    fn proptest_menu_filters_by_role(
        identity in arb_identity(),
        current in prop::sample::select(MENU.iter().map(|e| e.path).collect::<Vec<_>>())
    ) {
        let menu = menu_for(Some(&identity), current);

        let expected: Vec<&str> = MENU
            .iter()
            .filter(|e| e.roles.contains(identity.role))
            .map(|e| e.path)
            .collect();
        let shown: Vec<&str> = menu.iter().map(|i| i.entry.path).collect();
        prop_assert_eq!(shown, expected);

        prop_assert!(menu.iter().any(|i| i.entry.path == "/dashboard"));
        prop_assert!(menu.iter().any(|i| i.entry.path == "/dashboard/notifications"));
    }
}
