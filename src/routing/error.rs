//! Routing error definitions.

use thiserror::Error;

/// Problems detected while building a route table.
///
/// Construction stops at the first one; no partial table is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Two routes were declared with the same name.
    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    /// A route was declared with an empty name.
    #[error("route name must not be empty (pattern '{0}')")]
    EmptyName(String),

    /// A route template could not be parsed.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A route names a component that cannot be used as a chunk file name.
    #[error("route '{route}' has invalid component name '{component}'")]
    InvalidComponent { route: String, component: String },
}

/// Errors returned by route table operations.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No route matches the path. The host is expected to show a fallback view.
    #[error("no route matches path '{0}'")]
    NotFound(String),

    /// Reverse lookup for a name that is not in the table.
    #[error("unknown route name '{0}'")]
    UnknownRoute(String),

    /// Reverse lookup without a value for one of the route's named segments.
    #[error("missing parameter '{param}' for route '{route}'")]
    MissingParameter { route: String, param: String },

    /// Reverse lookup with a value that cannot fill a single path segment.
    #[error("invalid value '{value}' for parameter '{param}' of route '{route}'")]
    InvalidParameter {
        route: String,
        param: String,
        value: String,
    },
}

/// Result type for routing operations.
pub type RouterResult<T> = Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::NotFound("/nonexistent/".into());
        assert_eq!(err.to_string(), "no route matches path '/nonexistent/'");

        let err = RouterError::InvalidParameter {
            route: "tag".into(),
            param: "slug".into(),
            value: "a/b".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'a/b' for parameter 'slug' of route 'tag'"
        );

        let err = RouterError::MissingParameter {
            route: "question".into(),
            param: "uuid".into(),
        };
        assert!(err.to_string().contains("'uuid'"));
        assert!(err.to_string().contains("'question'"));
    }

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::DuplicateName("home".into());
        assert_eq!(err.to_string(), "duplicate route name 'home'");

        let err = ConfigurationError::InvalidComponent {
            route: "about".into(),
            component: "../secret".into(),
        };
        assert_eq!(
            err.to_string(),
            "route 'about' has invalid component name '../secret'"
        );
    }

    #[test]
    fn test_invalid_pattern_display() {
        let err = ConfigurationError::InvalidPattern {
            pattern: "tags/".into(),
            reason: "must start with '/'".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid route pattern 'tags/': must start with '/'"
        );
    }
}
