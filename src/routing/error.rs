//! Routing error types.

use thiserror::Error;

use crate::routing::pattern::PatternError;

/// Errors that can occur while building a router.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The pattern mapping was empty.
    #[error("no routes were registered")]
    NoRoutes,

    /// A pattern could not be compiled.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A compiled expression was rejected by the regex engine.
    #[error("pattern '{pattern}' does not form a valid expression: {source}")]
    Expression {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A literal segment adds capture groups of its own, which would shift
    /// parameter values.
    #[error("pattern '{pattern}' has {actual} capture groups, expected {expected} (one per parameter)")]
    GroupCount {
        pattern: String,
        expected: usize,
        actual: usize,
    },

    /// The same pattern string was registered twice.
    #[error("pattern '{0}' is registered more than once")]
    DuplicatePattern(String),

    /// A handler takes a different number of arguments than its pattern has parameters.
    #[error("handler for '{pattern}' takes {actual} arguments, pattern declares {expected} parameters")]
    ArityMismatch {
        pattern: String,
        expected: usize,
        actual: usize,
    },
}

/// Reasons a URL failed to resolve to a handler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The URL carries no `#`.
    #[error("URL has no fragment")]
    MissingFragment,

    /// The URL carries more than one `#`.
    #[error("URL has more than one '#'")]
    MultipleFragments,

    /// The hash path matched no registered pattern.
    #[error("no route matches '{0}'")]
    NoMatch(String),

    /// A captured value could not be converted.
    #[error("parameter '{name}' value '{value}' is not a valid {expected}")]
    ParamConversion {
        name: String,
        value: String,
        expected: String,
    },

    /// The handler was called with the wrong number of parameters.
    #[error("handler expects {expected} parameters, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
}
