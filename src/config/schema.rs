//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.
//! The default configuration carries the application's route table.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Prefix the app is served under, e.g. `/brainrefresh/`. `/` means none.
    pub base: String,

    /// When true, `/tags` and `/tags/` are distinct paths.
    pub strict_trailing_slash: bool,

    /// Route definitions, in match order.
    pub routes: Vec<RouteConfig>,

    /// Lazy view loading settings.
    pub views: ViewsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            strict_trailing_slash: true,
            routes: default_routes(),
            views: ViewsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A single route definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Unique route name, used for reverse lookups and logging.
    pub name: String,

    /// Path template, e.g. `/questions/:uuid/`.
    pub path: String,

    /// View component name, e.g. `QuestionView`.
    pub component: String,

    /// Fetch the component's chunk on first navigation instead of at startup.
    #[serde(default)]
    pub lazy: bool,
}

impl RouteConfig {
    pub fn new(name: &str, path: &str, component: &str, lazy: bool) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            component: component.to_string(),
            lazy,
        }
    }
}

/// The application's route table.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("home", "/", "HomeView", false),
        RouteConfig::new("about", "/about/", "AboutView", true),
        RouteConfig::new("question", "/questions/:uuid/", "QuestionView", false),
        RouteConfig::new("tags", "/tags/", "HomeView", false),
        RouteConfig::new("tag", "/tags/:slug/", "HomeView", false),
    ]
}

/// Lazy view loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Directory holding `<Component>.js` chunks for lazy views.
    pub chunk_dir: String,

    /// Per-load timeout in milliseconds (0 disables the timeout).
    pub load_timeout_ms: u64,
}

impl ViewsConfig {
    pub fn load_timeout(&self) -> Option<Duration> {
        (self.load_timeout_ms > 0).then(|| Duration::from_millis(self.load_timeout_ms))
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            chunk_dir: "dist/assets".to_string(),
            load_timeout_ms: 10_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter (e.g. `info`, `brainrefresh_router=debug`).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_route_table() {
        let config = RouterConfig::default();
        assert!(config.strict_trailing_slash);
        assert_eq!(config.base, "/");

        let table: Vec<(&str, &str, bool)> = config
            .routes
            .iter()
            .map(|r| (r.name.as_str(), r.path.as_str(), r.lazy))
            .collect();
        assert_eq!(
            table,
            vec![
                ("home", "/", false),
                ("about", "/about/", true),
                ("question", "/questions/:uuid/", false),
                ("tags", "/tags/", false),
                ("tag", "/tags/:slug/", false),
            ]
        );
    }

    #[test]
    fn test_load_timeout() {
        let mut views = ViewsConfig::default();
        assert_eq!(views.load_timeout(), Some(Duration::from_secs(10)));

        views.load_timeout_ms = 0;
        assert_eq!(views.load_timeout(), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RouterConfig = toml::from_str("strict_trailing_slash = false").unwrap();
        assert!(!config.strict_trailing_slash);
        assert_eq!(config.routes, default_routes());
        assert_eq!(config.views, ViewsConfig::default());
    }

    #[test]
    fn test_base_from_toml() {
        let config: RouterConfig = toml::from_str(r#"base = "/brainrefresh/""#).unwrap();
        assert_eq!(config.base, "/brainrefresh/");
        assert!(config.strict_trailing_slash);
    }
}
