//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every pattern compiles
//! - Detect duplicate route names and patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::pattern::{compile, PatternError};

/// A single semantic problem in a route file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no routes defined")]
    NoRoutes,

    #[error("route #{0} has an empty name")]
    EmptyName(usize),

    #[error("route name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("pattern '{0}' is used more than once")]
    DuplicatePattern(String),

    #[error("route '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: PatternError,
    },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut names = HashSet::new();
    let mut patterns = HashSet::new();

    for (i, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName(i));
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName(route.name.clone()));
        }

        if !patterns.insert(route.pattern.as_str()) {
            errors.push(ValidationError::DuplicatePattern(route.pattern.clone()));
        }

        if let Err(source) = compile(&route.pattern) {
            errors.push(ValidationError::InvalidPattern {
                name: route.name.clone(),
                source,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    fn route(name: &str, pattern: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = RouterConfig {
            routes: vec![route("home", "/"), route("item", "/items/:id:int")],
            ..Default::default()
        };
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = RouterConfig {
            routes: vec![
                route("home", "/"),
                route("home", "/"),
                route("", "/a/:"),
            ],
            ..Default::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateName("home".into()),
                ValidationError::DuplicatePattern("/".into()),
                ValidationError::EmptyName(2),
                ValidationError::InvalidPattern {
                    name: "".into(),
                    source: PatternError::UnnamedParam {
                        pattern: "/a/:".into()
                    },
                },
            ]
        );
    }
}
