//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect duplicate route names and malformed templates
//! - Check component names and loader settings for lazy routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::RouterConfig;
use crate::routing::{ConfigurationError, PathPattern};
use crate::views::is_component_name;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no routes configured")]
    NoRoutes,

    #[error("route #{index}: name must not be empty")]
    EmptyName { index: usize },

    #[error("duplicate route name '{name}' (routes #{first} and #{second})")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("route '{name}': {error}")]
    Pattern {
        name: String,
        error: ConfigurationError,
    },

    #[error("route '{name}': invalid component name '{component}'")]
    InvalidComponent { name: String, component: String },

    #[error("base '{0}' must start with '/' and contain no '?' or '#'")]
    InvalidBase(String),

    #[error("views.chunk_dir must be set when lazy routes are configured")]
    MissingChunkDir,

    #[error("observability.log_level '{0}' is not a valid log filter")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    if !config.base.starts_with('/') || config.base.contains(['?', '#']) {
        errors.push(ValidationError::InvalidBase(config.base.clone()));
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if let Some(&first) = seen.get(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName {
                name: route.name.clone(),
                first,
                second: index,
            });
        } else {
            seen.insert(&route.name, index);
        }

        if let Err(error) = PathPattern::parse(&route.path) {
            errors.push(ValidationError::Pattern {
                name: route.name.clone(),
                error,
            });
        }

        if !is_component_name(&route.component) {
            errors.push(ValidationError::InvalidComponent {
                name: route.name.clone(),
                component: route.component.clone(),
            });
        }
    }

    if config.routes.iter().any(|r| r.lazy) && config.views.chunk_dir.trim().is_empty() {
        errors.push(ValidationError::MissingChunkDir);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
