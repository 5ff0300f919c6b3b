//! The application's route table.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::pattern::{PatternError, RoutePattern};

/// Conventional routes: name, template, fixed defaults.
pub const CONVENTIONAL_ROUTES: [(&str, &str, &[(&str, &str)]); 5] = [
    ("default", "{controller=Home}/{action=Index}/{id?}", &[]),
    ("dashboard", "Dashboard/{action=Index}/{id?}", &[("controller", "Dashboard")]),
    ("category", "Category/{action=Index}/{id?}", &[("controller", "Category")]),
    ("transaction", "Transaction/{action=Index}/{id?}", &[("controller", "Transaction")]),
    ("demodashboard", "DemoDashboard/{action=Demo}/{id?}", &[("controller", "DemoDashboard")]),
];

/// Controllers that only serve signed-in users.
const PROTECTED_CONTROLLERS: [&str; 3] = ["Dashboard", "Category", "Transaction"];

/// Endpoints outside the conventional routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEndpoint {
    Login,
    Register,
    Logout,
    Health,
}

const PAGES: [(&str, PageEndpoint); 4] = [
    ("/Identity/Account/Login", PageEndpoint::Login),
    ("/Identity/Account/Register", PageEndpoint::Register),
    ("/Identity/Account/Logout", PageEndpoint::Logout),
    ("/health", PageEndpoint::Health),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static str,
    pub controller: String,
    pub action: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedEndpoint {
    Controller(RouteMatch),
    Page(PageEndpoint),
}

impl ResolvedEndpoint {
    pub fn requires_auth(&self) -> bool {
        match self {
            ResolvedEndpoint::Controller(m) => PROTECTED_CONTROLLERS
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&m.controller)),
            ResolvedEndpoint::Page(_) => false,
        }
    }
}

#[derive(Debug)]
struct RouteDef {
    name: &'static str,
    pattern: RoutePattern,
    defaults: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

static STANDARD: Lazy<RouteTable> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    RouteTable::new(&CONVENTIONAL_ROUTES).unwrap()
});

impl RouteTable {
    /// Build a table, trying literal-prefixed routes before the
    /// all-parameter ones. Declaration order is kept otherwise.
    pub fn new(
        definitions: &[(&'static str, &str, &[(&str, &str)])],
    ) -> Result<Self, PatternError> {
        let mut routes = definitions
            .iter()
            .map(|&(name, template, defaults)| {
                Ok(RouteDef {
                    name,
                    pattern: RoutePattern::parse(template)?,
                    defaults: defaults
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        routes.sort_by_key(|r| !r.pattern.starts_with_literal());
        Ok(Self { routes })
    }

    pub fn standard() -> &'static RouteTable {
        &STANDARD
    }

    pub fn route_names(&self) -> Vec<&'static str> {
        self.routes.iter().map(|r| r.name).collect()
    }

    /// First conventional route matching `path`.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.routes.iter().find_map(|route| {
            let mut values = route.defaults.clone();
            values.extend(route.pattern.match_path(path)?);

            Some(RouteMatch {
                route: route.name,
                controller: values.remove("controller")?,
                action: values.remove("action")?,
                id: values.remove("id"),
            })
        })
    }

    /// Resolve `path` to a page or a conventional route.
    pub fn resolve(&self, path: &str) -> Option<ResolvedEndpoint> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        if let Some((_, page)) = PAGES
            .iter()
            .find(|(page_path, _)| page_path.eq_ignore_ascii_case(trimmed))
        {
            return Some(ResolvedEndpoint::Page(*page));
        }
        self.match_path(path).map(ResolvedEndpoint::Controller)
    }
}
