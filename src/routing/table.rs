//! Dispatch table assembly.
//!
//! # Responsibilities
//! - Compile every pattern, keeping declaration order
//! - Build one combined alternation expression across all routes
//! - Identify the matching route and re-match it for parameter values
//!
//! # Design Decisions
//! - Declaration order is the only precedence rule: on overlap, the
//!   earliest-declared route wins
//! - The combined expression has exactly one capture group per route, in
//!   route order; inner groups are stripped so they cannot shift indices
//! - All expressions match ASCII case-insensitively, on bytes: `[0-9a-z_]`
//!   never folds to non-ASCII letters such as `ſ` or the Kelvin sign
//! - Non-ASCII characters in literal segments match their UTF-8 bytes exactly
//! - A route must have exactly one capture group per parameter
//! - Immutable after construction

use regex::bytes::{Regex, RegexBuilder};

use crate::routing::error::RouterError;
use crate::routing::pattern::{compile, CompiledPattern};

/// Route index and raw parameter captures for a matched hash path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Position of the route in declaration order.
    pub index: usize,
    /// Captured parameter text, left to right.
    pub params: Vec<String>,
}

/// Compiled patterns plus the combined matcher.
#[derive(Debug, Clone)]
pub struct RouteTable {
    patterns: Vec<CompiledPattern>,
    matchers: Vec<Regex>,
    combined: Regex,
    combined_expression: String,
}

impl RouteTable {
    /// Compile `patterns` in order and assemble the combined matcher.
    pub fn build<I, P>(patterns: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| compile(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if patterns.is_empty() {
            return Err(RouterError::NoRoutes);
        }

        let matchers = patterns
            .iter()
            .map(|compiled| {
                let matcher = build_regex(compiled.pattern(), compiled.expression())?;
                let groups = matcher.captures_len() - 1;
                if groups != compiled.param_count() {
                    return Err(RouterError::GroupCount {
                        pattern: compiled.pattern().to_owned(),
                        expected: compiled.param_count(),
                        actual: groups,
                    });
                }
                Ok(matcher)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let combined_expression =
            combine(patterns.iter().map(|compiled| compiled.expression()));
        let combined = build_regex("<combined>", &combined_expression)?;

        tracing::debug!(
            routes = patterns.len(),
            combined = %combined_expression,
            "Route table built"
        );

        Ok(Self {
            patterns,
            matchers,
            combined,
            combined_expression,
        })
    }

    /// Find the route matching `hash_path`.
    ///
    /// Runs the combined matcher to pick the route, then that route's own
    /// matcher to collect its parameter captures.
    pub fn find(&self, hash_path: &str) -> Option<RouteMatch> {
        let captures = self.combined.captures(hash_path.as_bytes())?;

        // group 0 is the whole match; group n belongs to route n - 1
        let index = (1..captures.len()).find(|&group| captures.get(group).is_some())? - 1;

        let captures = self.matchers.get(index)?.captures(hash_path.as_bytes())?;
        let params = captures
            .iter()
            .skip(1)
            .map(|capture| {
                capture.map_or_else(String::new, |m| {
                    String::from_utf8_lossy(m.as_bytes()).into_owned()
                })
            })
            .collect();

        Some(RouteMatch { index, params })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CompiledPattern> {
        self.patterns.get(index)
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Per-route matching expressions, in route order.
    pub fn expressions(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.iter().map(|compiled| compiled.expression())
    }

    pub fn combined_expression(&self) -> &str {
        &self.combined_expression
    }
}

/// Remove every parenthesis from a compiled expression.
pub fn strip_groups(expression: &str) -> String {
    expression.chars().filter(|c| !matches!(c, '(' | ')')).collect()
}

/// Join stripped expressions into `(e1)|(e2)|...`.
pub fn combine<'a>(expressions: impl IntoIterator<Item = &'a str>) -> String {
    expressions
        .into_iter()
        .map(|expression| format!("({})", strip_groups(expression)))
        .collect::<Vec<_>>()
        .join("|")
}

/// Rewrite non-ASCII characters as `\xHH` byte escapes.
///
/// With Unicode disabled the engine only accepts ASCII literals.
fn escape_non_ascii(expression: &str) -> String {
    let mut escaped = String::with_capacity(expression.len());
    for c in expression.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            let mut buf = [0; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                escaped.push_str(&format!("\\x{:02X}", byte));
            }
        }
    }
    escaped
}

fn build_regex(pattern: &str, expression: &str) -> Result<Regex, RouterError> {
    RegexBuilder::new(&escape_non_ascii(expression))
        .unicode(false)
        .case_insensitive(true)
        .build()
        .map_err(|source| RouterError::Expression {
            pattern: pattern.to_owned(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_expression() {
        let table = RouteTable::build(["/", "/sections/", "/sections/:section_id"]).unwrap();
        assert_eq!(
            table.combined_expression(),
            "(^/$)|(^/sections/?$)|(^/sections/[0-9a-z_]+/?$)"
        );
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_find_identifies_route() {
        let table = RouteTable::build(["/", "/sections/", "/sections/:section_id"]).unwrap();

        assert_eq!(
            table.find("/"),
            Some(RouteMatch { index: 0, params: vec![] })
        );
        assert_eq!(
            table.find("/sections"),
            Some(RouteMatch { index: 1, params: vec![] })
        );
        assert_eq!(
            table.find("/sections/7/"),
            Some(RouteMatch { index: 2, params: vec!["7".into()] })
        );
        assert_eq!(table.find("/other"), None);
    }

    #[test]
    fn test_case_insensitive() {
        let table = RouteTable::build(["/Users/:id"]).unwrap();
        let found = table.find("/users/AbC").unwrap();
        assert_eq!(found.params, vec!["AbC".to_string()]);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let table = RouteTable::build(["/a/:x", "/a/:y", "/a/b"]).unwrap();
        assert_eq!(table.find("/a/b").unwrap().index, 0);

        let table = RouteTable::build(["/a/b", "/a/:x"]).unwrap();
        assert_eq!(table.find("/a/b").unwrap().index, 0);
        assert_eq!(table.find("/a/c").unwrap().index, 1);
    }

    #[test]
    fn test_empty_table() {
        let patterns: Vec<&str> = Vec::new();
        assert!(matches!(
            RouteTable::build(patterns),
            Err(RouterError::NoRoutes)
        ));
    }

    #[test]
    fn test_invalid_expression() {
        let err = RouteTable::build(["/a[/:id"]).unwrap_err();
        assert!(matches!(err, RouterError::Expression { pattern, .. } if pattern == "/a[/:id"));
    }

    #[test]
    fn test_ascii_only_case_folding() {
        let table = RouteTable::build(["/k", "/sections/:id"]).unwrap();
        assert_eq!(table.find("/K").unwrap().index, 0);
        assert_eq!(table.find("/\u{212A}"), None);
        assert_eq!(table.find("/sections/\u{17F}"), None);
        assert_eq!(table.find("/sections/\u{212A}"), None);
    }

    #[test]
    fn test_non_ascii_literal() {
        let table = RouteTable::build(["/café/:id"]).unwrap();
        let found = table.find("/café/7").unwrap();
        assert_eq!(found.params, vec!["7".to_string()]);
        assert_eq!(table.find("/cafe/7"), None);
        assert_eq!(escape_non_ascii("/café"), "/caf\\xC3\\xA9");
    }

    #[test]
    fn test_literal_group_rejected() {
        let err = RouteTable::build(["/v(1|2)/:id"]).unwrap_err();
        assert!(matches!(
            err,
            RouterError::GroupCount { expected: 1, actual: 2, .. }
        ));
    }

    #[test]
    fn test_strip_groups() {
        assert_eq!(strip_groups("^/a/([0-9a-z_]+)/?$"), "^/a/[0-9a-z_]+/?$");
    }
}
