//! Fragment-based view routing.
//!
//! The route table is fixed at startup: four declared routes in navigation
//! order plus a sentinel for unknown fragments.
//!
//! ## Resolution Rules
//!
//! ```text
//! ""  or "#"        →  Home        (too short to carry a path: default route)
//! "#/"              →  Home
//! "#/about"         →  About
//! "#/posts"         →  Posts
//! "#/contact"       →  Contact
//! anything else     →  Page not found
//! ```
//!
//! Empty input falls back to the default route, but a non-empty unmatched
//! fragment does NOT: it resolves to the sentinel. Both behaviors are
//! relied on by callers.

/// Which view a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewTag {
    Home,
    About,
    Posts,
    Contact,
    NotFound,
}

/// Static descriptor mapping a URL fragment to a named view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Display name, used in the nav list, the content heading, and the title.
    pub name: &'static str,
    /// Exact fragment this route answers to. Empty for the sentinel.
    pub url_fragment: &'static str,
    pub view: ViewTag,
}

/// Declared routes in navigation order. The first entry is the default.
pub const ROUTES: [Route; 4] = [
    Route {
        name: "Home",
        url_fragment: "#/",
        view: ViewTag::Home,
    },
    Route {
        name: "About",
        url_fragment: "#/about",
        view: ViewTag::About,
    },
    Route {
        name: "Posts",
        url_fragment: "#/posts",
        view: ViewTag::Posts,
    },
    Route {
        name: "Contact",
        url_fragment: "#/contact",
        view: ViewTag::Contact,
    },
];

/// Sentinel returned for fragments that match no declared route.
pub const NOT_FOUND: Route = Route {
    name: "Page not found",
    url_fragment: "",
    view: ViewTag::NotFound,
};

/// Resolve a fragment against the route table.
///
/// Length is counted in UTF-16 code units, the way browsers measure
/// `location.hash`.
pub fn resolve(fragment: &str) -> Route {
    if fragment.encode_utf16().count() < 2 {
        return ROUTES[0];
    }
    ROUTES
        .iter()
        .find(|route| route.url_fragment == fragment)
        .copied()
        .unwrap_or(NOT_FOUND)
}

/// Page title for a route: `"<route name> - <app title>"`.
pub fn page_title(route: &Route, app_title: &str) -> String {
    format!("{} - {}", route.name, app_title)
}

/// The shell's routing state: the currently selected route and the document
/// title derived from it.
#[derive(Debug, Clone)]
pub struct Router {
    app_title: String,
    current: Route,
    title: String,
}

impl Router {
    /// Create a router positioned at `initial_fragment`.
    pub fn new(app_title: impl Into<String>, initial_fragment: &str) -> Self {
        let app_title = app_title.into();
        let current = resolve(initial_fragment);
        let title = page_title(&current, &app_title);
        tracing::debug!(fragment = initial_fragment, route = current.name, "initial route");
        Self {
            app_title,
            current,
            title,
        }
    }

    /// Re-resolve after a fragment change. Always updates the title, even
    /// when the resolved route is the same as before.
    ///
    /// Returns the previous route so the caller can detect view entry.
    pub fn navigate(&mut self, fragment: &str) -> Route {
        let previous = self.current;
        self.current = resolve(fragment);
        self.title = page_title(&self.current, &self.app_title);
        tracing::debug!(
            fragment,
            route = self.current.name,
            previous = previous.name,
            "route resolved"
        );
        previous
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn app_title(&self) -> &str {
        &self.app_title
    }

    /// Routes shown in the navigation list.
    pub fn routes(&self) -> &'static [Route] {
        &ROUTES
    }
}
