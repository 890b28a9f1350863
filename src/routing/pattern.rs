//! Path pattern compilation.
//!
//! # Responsibilities
//! - Split a `/`-delimited pattern into literal and parameter segments
//! - Produce the anchored matching expression for the pattern
//! - Record parameter names and kinds in declaration order
//!
//! # Design Decisions
//! - `/` is special: it matches exactly `/` and nothing else
//! - Empty segments are dropped, so leading/trailing slashes are insignificant
//! - Every non-root pattern accepts one optional trailing slash
//! - Literal segments go into the expression verbatim (not escaped)
//! - Parameter kinds never change the expression, only extraction

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Expression for the root pattern `/`.
pub const ROOT_EXPRESSION: &str = "^/$";

/// Capture group substituted for every parameter segment.
///
/// Upper-case letters are accepted through case-insensitive matching.
pub const PARAM_EXPRESSION: &str = "([0-9a-z_]+)";

/// Value kind declared by a parameter segment (`:id` or `:id:int`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Raw text, the default.
    #[default]
    Text,
    /// Signed 64-bit integer.
    Integer,
}

impl FromStr for ParamKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ParamKind::Text),
            "int" => Ok(ParamKind::Integer),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Text => write!(f, "text"),
            ParamKind::Integer => write!(f, "integer"),
        }
    }
}

/// One non-empty segment of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, matched as written.
    Literal(String),
    /// A `:name` parameter.
    Param { name: String, kind: ParamKind },
}

/// Errors raised while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("parameter segment in '{pattern}' has no name")]
    UnnamedParam { pattern: String },

    #[error("unknown parameter kind '{kind}' in '{pattern}'")]
    UnknownKind { pattern: String, kind: String },
}

/// A pattern compiled into its anchored expression and segment list.
///
/// Derived deterministically from the pattern string and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    pattern: String,
    expression: String,
    segments: Vec<Segment>,
}

impl CompiledPattern {
    /// The pattern as the caller declared it.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The anchored matching expression, one capture group per parameter.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of parameter segments (and capture groups).
    pub fn param_count(&self) -> usize {
        self.params().count()
    }

    /// Parameter names and kinds, left to right.
    pub fn params(&self) -> impl Iterator<Item = (&str, ParamKind)> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param { name, kind } => Some((name.as_str(), *kind)),
            Segment::Literal(_) => None,
        })
    }

    pub fn param_names(&self) -> Vec<&str> {
        self.params().map(|(name, _)| name).collect()
    }

    pub fn is_root(&self) -> bool {
        self.expression == ROOT_EXPRESSION
    }
}

/// Compile one pattern.
///
/// ```
/// use hashbang_router::routing::pattern::compile;
///
/// let compiled = compile("/sections/:section_id").unwrap();
/// assert_eq!(compiled.expression(), "^/sections/([0-9a-z_]+)/?$");
/// assert_eq!(compiled.param_count(), 1);
/// ```
pub fn compile(pattern: &str) -> Result<CompiledPattern, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }

    if pattern == "/" {
        return Ok(CompiledPattern {
            pattern: pattern.to_owned(),
            expression: ROOT_EXPRESSION.to_owned(),
            segments: Vec::new(),
        });
    }

    let segments = pattern
        .split('/')
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| parse_segment(pattern, fragment))
        .collect::<Result<Vec<_>, _>>()?;

    let mut expression = String::from("^");
    for segment in &segments {
        expression.push('/');
        match segment {
            Segment::Literal(text) => expression.push_str(text),
            Segment::Param { .. } => expression.push_str(PARAM_EXPRESSION),
        }
    }
    expression.push_str("/?$");

    Ok(CompiledPattern {
        pattern: pattern.to_owned(),
        expression,
        segments,
    })
}

fn parse_segment(pattern: &str, fragment: &str) -> Result<Segment, PatternError> {
    let Some(declaration) = fragment.strip_prefix(':') else {
        return Ok(Segment::Literal(fragment.to_owned()));
    };

    let (name, kind) = match declaration.split_once(':') {
        Some((name, kind)) => {
            let kind = kind.parse().map_err(|_| PatternError::UnknownKind {
                pattern: pattern.to_owned(),
                kind: kind.to_owned(),
            })?;
            (name, kind)
        }
        None => (declaration, ParamKind::Text),
    };

    if name.is_empty() {
        return Err(PatternError::UnnamedParam {
            pattern: pattern.to_owned(),
        });
    }

    Ok(Segment::Param {
        name: name.to_owned(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern() {
        let compiled = compile("/").unwrap();
        assert_eq!(compiled.expression(), "^/$");
        assert_eq!(compiled.param_count(), 0);
        assert!(compiled.is_root());
    }

    #[test]
    fn test_literal_pattern() {
        let compiled = compile("/sections/").unwrap();
        assert_eq!(compiled.expression(), "^/sections/?$");
        assert_eq!(compiled.segments(), &[Segment::Literal("sections".into())]);
    }

    #[test]
    fn test_param_pattern() {
        let compiled = compile("/sections/:section_id/items/:item").unwrap();
        assert_eq!(
            compiled.expression(),
            "^/sections/([0-9a-z_]+)/items/([0-9a-z_]+)/?$"
        );
        assert_eq!(compiled.param_count(), 2);
        assert_eq!(compiled.param_names(), vec!["section_id", "item"]);
    }

    #[test]
    fn test_slashes_are_insignificant() {
        let a = compile("/a/:id").unwrap();
        let b = compile("a/:id/").unwrap();
        let c = compile("//a//:id").unwrap();
        assert_eq!(a.expression(), b.expression());
        assert_eq!(a.expression(), c.expression());
        assert_eq!(b.pattern(), "a/:id/");
    }

    #[test]
    fn test_literal_not_escaped() {
        let compiled = compile("/files/v1.0").unwrap();
        assert_eq!(compiled.expression(), "^/files/v1.0/?$");
    }

    #[test]
    fn test_param_kinds() {
        let compiled = compile("/page/:n:int/:slug:text").unwrap();
        let params: Vec<_> = compiled.params().collect();
        assert_eq!(
            params,
            vec![("n", ParamKind::Integer), ("slug", ParamKind::Text)]
        );
        // kinds do not change the expression
        assert_eq!(
            compiled.expression(),
            "^/page/([0-9a-z_]+)/([0-9a-z_]+)/?$"
        );
    }

    #[test]
    fn test_invalid_patterns() {
        assert_eq!(compile(""), Err(PatternError::Empty));
        assert!(matches!(
            compile("/a/:"),
            Err(PatternError::UnnamedParam { .. })
        ));
        assert!(matches!(
            compile("/a/:id:float"),
            Err(PatternError::UnknownKind { kind, .. }) if kind == "float"
        ));
        for kind in ["integer", "string", "str", "INT"] {
            assert!(matches!(
                compile(&format!("/a/:id:{}", kind)),
                Err(PatternError::UnknownKind { .. })
            ));
        }
    }
}
