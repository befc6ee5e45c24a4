//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Own the ordered routes and their view references
//! - Look up the first route matching a path
//! - Return a match with captured parameters or an explicit NotFound
//! - Build paths for named routes (reverse lookup)
//! - Strip and prepend the base prefix the app is served under
//!
//! # Design Decisions
//! - Immutable after construction (shareable without locks)
//! - O(1) name lookup via HashMap, O(n) ordered path scan
//! - Duplicate names fail construction; no partial table is returned

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::schema::RouterConfig;
use crate::observability::metrics;
use crate::routing::error::{ConfigurationError, RouterError, RouterResult};
use crate::routing::location::Location;
use crate::routing::matcher::{PathPattern, ReverseError};
use crate::routing::params::Params;
use crate::views::{is_component_name, LoadError, View, ViewLoader, ViewRef};

/// A single route: unique name, path pattern and view reference.
#[derive(Debug)]
pub struct Route {
    name: String,
    pattern: PathPattern,
    view: ViewRef,
}

impl Route {
    /// Create a route from a template such as `/questions/:uuid/`.
    pub fn new(
        name: impl Into<String>,
        template: &str,
        view: ViewRef,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName(template.to_string()));
        }
        Ok(Self {
            name,
            pattern: PathPattern::parse(template)?,
            view,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn view(&self) -> &ViewRef {
        &self.view
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    name: String,
    params: Params,
    view: ViewRef,
}

impl RouteMatch {
    /// Name of the matched route.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters captured from the path, in template order.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Handle to the route's view. Shares the table's lazy cache.
    pub fn view(&self) -> &ViewRef {
        &self.view
    }

    /// Obtain the view, loading it first if it is lazy and not yet cached.
    pub async fn resolve_view(&self) -> Result<Arc<View>, LoadError> {
        self.view.resolve().await
    }
}

/// Ordered, immutable route table.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_name: HashMap<String, usize>,
    strict_trailing_slash: bool,
    /// Normalized prefix: empty, or `/segment...` without a trailing slash.
    base: String,
}

impl RouteTable {
    /// Build a table with literal trailing-slash matching.
    pub fn new(routes: Vec<Route>) -> Result<Self, ConfigurationError> {
        Self::with_trailing_slash_policy(routes, true)
    }

    /// Build a table, choosing whether trailing slashes are significant.
    pub fn with_trailing_slash_policy(
        routes: Vec<Route>,
        strict_trailing_slash: bool,
    ) -> Result<Self, ConfigurationError> {
        let mut by_name = HashMap::with_capacity(routes.len());
        for (index, route) in routes.iter().enumerate() {
            if by_name.insert(route.name.clone(), index).is_some() {
                return Err(ConfigurationError::DuplicateName(route.name.clone()));
            }
        }

        tracing::debug!(
            routes = routes.len(),
            strict_trailing_slash,
            "Route table built"
        );

        Ok(Self {
            routes,
            by_name,
            strict_trailing_slash,
            base: String::new(),
        })
    }

    /// Serve the table under `base`, e.g. `/brainrefresh/`.
    ///
    /// `resolve_location` strips the prefix and `reverse` prepends it.
    /// `resolve` keeps working on app-relative paths. An empty base or `/`
    /// means no prefix.
    pub fn with_base(mut self, base: &str) -> Self {
        let trimmed = base.trim_end_matches('/');
        self.base = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        self
    }

    /// Build the table described by `config`.
    ///
    /// Lazy routes get their own cache cell and share `loader`. Component
    /// names must be identifiers, since loaders use them as file stems.
    pub fn from_config(
        config: &RouterConfig,
        loader: Arc<dyn ViewLoader>,
    ) -> Result<Self, ConfigurationError> {
        let timeout = config.views.load_timeout();
        let routes = config
            .routes
            .iter()
            .map(|route| {
                if !is_component_name(&route.component) {
                    return Err(ConfigurationError::InvalidComponent {
                        route: route.name.clone(),
                        component: route.component.clone(),
                    });
                }
                let view = if route.lazy {
                    ViewRef::lazy(route.component.as_str(), loader.clone(), timeout)
                } else {
                    ViewRef::eager(View::new(route.component.as_str()))
                };
                Route::new(route.name.as_str(), &route.path, view)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::with_trailing_slash_policy(routes, config.strict_trailing_slash)?
            .with_base(&config.base))
    }

    /// Find the first route, in declaration order, that matches `path`.
    pub fn resolve(&self, path: &str) -> RouterResult<RouteMatch> {
        for route in &self.routes {
            if let Some(params) = route.pattern.captures(path, self.strict_trailing_slash) {
                tracing::debug!(path, route = %route.name, "Route matched");
                metrics::record_resolution(&route.name);
                return Ok(RouteMatch {
                    name: route.name.clone(),
                    params,
                    view: route.view.clone(),
                });
            }
        }

        metrics::record_not_found();
        Err(RouterError::NotFound(path.to_string()))
    }

    /// Resolve the path part of a location, ignoring query and fragment.
    ///
    /// The location includes the base prefix, if any; paths outside it are
    /// not found.
    pub fn resolve_location(&self, location: &str) -> RouterResult<RouteMatch> {
        let path = Location::parse(location).path;
        match self.strip_base(path) {
            Some(relative) => self.resolve(relative),
            None => {
                metrics::record_not_found();
                Err(RouterError::NotFound(path.to_string()))
            }
        }
    }

    fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base.is_empty() {
            return Some(path);
        }
        match path.strip_prefix(self.base.as_str())? {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }

    /// Obtain the view for a match. Suspends while a lazy view loads.
    pub async fn resolve_view(&self, route_match: &RouteMatch) -> Result<Arc<View>, LoadError> {
        route_match.resolve_view().await
    }

    /// Build the path for the named route, including the base prefix.
    ///
    /// Values must fill exactly one segment each, so the result resolves
    /// back to the same parameters.
    pub fn reverse(&self, name: &str, params: &Params) -> RouterResult<String> {
        let route = self
            .get(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;

        let path = route.pattern.reverse(params).map_err(|e| match e {
            ReverseError::Missing(param) => RouterError::MissingParameter {
                route: name.to_string(),
                param,
            },
            ReverseError::Invalid { param, value } => RouterError::InvalidParameter {
                route: name.to_string(),
                param,
                value,
            },
        })?;

        Ok(format!("{}{}", self.base, path))
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn strict_trailing_slash(&self) -> bool {
        self.strict_trailing_slash
    }

    /// The base prefix, or `""` when the app is served from the root.
    pub fn base(&self) -> &str {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eager(component: &str) -> ViewRef {
        ViewRef::eager(View::new(component))
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let routes = vec![
            Route::new("home", "/", eager("HomeView")).unwrap(),
            Route::new("home", "/home/", eager("HomeView")).unwrap(),
        ];
        let err = RouteTable::new(routes).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateName("home".into()));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Route::new("", "/", eager("HomeView")).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyName(_)));
    }

    #[test]
    fn test_lookup_by_name() {
        let table = RouteTable::new(vec![
            Route::new("home", "/", eager("HomeView")).unwrap(),
            Route::new("tag", "/tags/:slug/", eager("HomeView")).unwrap(),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("tag").unwrap().pattern().template(), "/tags/:slug/");
        assert!(table.get("missing").is_none());
    }

    #[test]
    fn test_resolve_location_ignores_query() {
        let table = RouteTable::new(vec![
            Route::new("tag", "/tags/:slug/", eager("HomeView")).unwrap(),
        ])
        .unwrap();

        let matched = table.resolve_location("/tags/rust/?page=2#top").unwrap();
        assert_eq!(matched.name(), "tag");
        assert_eq!(matched.param("slug"), Some("rust"));
    }

    #[test]
    fn test_reverse_errors() {
        let table = RouteTable::new(vec![
            Route::new("question", "/questions/:uuid/", eager("QuestionView")).unwrap(),
        ])
        .unwrap();

        assert!(matches!(
            table.reverse("missing", &Params::new()),
            Err(RouterError::UnknownRoute(name)) if name == "missing"
        ));
        assert!(matches!(
            table.reverse("question", &Params::new()),
            Err(RouterError::MissingParameter { param, .. }) if param == "uuid"
        ));

        let params: Params = [("uuid", "a/b")].into_iter().collect();
        assert!(matches!(
            table.reverse("question", &params),
            Err(RouterError::InvalidParameter { route, param, value })
                if route == "question" && param == "uuid" && value == "a/b"
        ));
    }

    #[test]
    fn test_base_normalization() {
        let table = || {
            RouteTable::new(vec![Route::new("home", "/", eager("HomeView")).unwrap()]).unwrap()
        };
        assert_eq!(table().base(), "");
        assert_eq!(table().with_base("/").base(), "");
        assert_eq!(table().with_base("").base(), "");
        assert_eq!(table().with_base("/app/").base(), "/app");
        assert_eq!(table().with_base("app").base(), "/app");
    }

    #[test]
    fn test_base_prefix() {
        let table = RouteTable::new(vec![
            Route::new("home", "/", eager("HomeView")).unwrap(),
            Route::new("tag", "/tags/:slug/", eager("HomeView")).unwrap(),
        ])
        .unwrap()
        .with_base("/brainrefresh/");

        assert_eq!(table.resolve_location("/brainrefresh/").unwrap().name(), "home");
        assert_eq!(table.resolve_location("/brainrefresh").unwrap().name(), "home");
        assert_eq!(
            table.resolve_location("/brainrefresh/tags/rust/?x=1").unwrap().param("slug"),
            Some("rust")
        );
        assert!(matches!(
            table.resolve_location("/tags/rust/"),
            Err(RouterError::NotFound(path)) if path == "/tags/rust/"
        ));
        assert!(table.resolve_location("/brainrefreshx/").is_err());

        let params: Params = [("slug", "rust")].into_iter().collect();
        assert_eq!(table.reverse("tag", &params).unwrap(), "/brainrefresh/tags/rust/");
        assert_eq!(table.reverse("home", &Params::new()).unwrap(), "/brainrefresh/");
    }

    #[test]
    fn test_from_config_rejects_unsafe_component() {
        let mut config = RouterConfig::default();
        config.routes[1].component = "../secret".into();

        let loader = Arc::new(crate::views::ChunkDirLoader::new("unused"));
        let err = RouteTable::from_config(&config, loader).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidComponent {
                route: "about".into(),
                component: "../secret".into(),
            }
        );
    }
}
