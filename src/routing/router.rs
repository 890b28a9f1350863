//! URL resolution and handler dispatch.
//!
//! # Responsibilities
//! - Build the route table from an ordered pattern → handler mapping
//! - Reject handlers whose arity differs from their pattern
//! - Extract the hash path from a URL and resolve it to a route
//! - Convert parameters and invoke the bound handler
//!
//! # Design Decisions
//! - Immutable after construction (no route is added or replaced)
//! - Declaration order decides between overlapping patterns
//! - `parse_url` collapses every failure to `None`; `resolve` keeps the reason

use std::collections::HashSet;

use crate::routing::error::{ResolveError, RouterError};
use crate::routing::handler::{BoxedHandler, Handler};
use crate::routing::params::{Param, ParamValue, Params};
use crate::routing::table::RouteTable;

/// Split `url` at its `#` and return the hash path.
///
/// The URL must contain exactly one `#`.
pub fn split_fragment(url: &str) -> Result<&str, ResolveError> {
    let mut parts = url.split('#').skip(1);
    match (parts.next(), parts.next()) {
        (Some(hash_path), None) => Ok(hash_path),
        (Some(_), Some(_)) => Err(ResolveError::MultipleFragments),
        (None, _) => Err(ResolveError::MissingFragment),
    }
}

/// A hashbang router.
///
/// ```
/// use hashbang_router::Router;
///
/// let router = Router::builder()
///     .route("/", || "home".to_string())
///     .route("/sections/:id", |id: String| format!("section {}", id))
///     .build()
///     .unwrap();
///
/// assert_eq!(router.parse_url("page#/sections/5/").as_deref(), Some("section 5"));
/// assert_eq!(router.parse_url("page#/zzz"), None);
/// ```
#[derive(Debug)]
pub struct Router<R> {
    table: RouteTable,
    handlers: Vec<BoxedHandler<R>>,
}

impl<R: 'static> Router<R> {
    pub fn builder() -> RouterBuilder<R> {
        RouterBuilder::new()
    }

    /// Build a router from `(pattern, handler)` pairs, in precedence order.
    pub fn new<I, P>(paths: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = (P, BoxedHandler<R>)>,
        P: Into<String>,
    {
        let (patterns, handlers): (Vec<String>, Vec<BoxedHandler<R>>) = paths
            .into_iter()
            .map(|(pattern, handler)| (pattern.into(), handler))
            .unzip();

        if patterns.is_empty() {
            return Err(RouterError::NoRoutes);
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = patterns.iter().find(|pattern| !seen.insert(pattern.as_str())) {
            return Err(RouterError::DuplicatePattern(duplicate.clone()));
        }

        let table = RouteTable::build(&patterns)?;

        for (compiled, handler) in table.patterns().iter().zip(&handlers) {
            match handler.arity() {
                Some(arity) if arity != compiled.param_count() => {
                    return Err(RouterError::ArityMismatch {
                        pattern: compiled.pattern().to_owned(),
                        expected: compiled.param_count(),
                        actual: arity,
                    });
                }
                _ => {}
            }
        }

        tracing::info!(routes = table.len(), "Router initialized");

        Ok(Self { table, handlers })
    }
}

impl<R> Router<R> {
    /// Resolve `url` and invoke the matching handler, returning its result.
    ///
    /// Any failure yields `None`.
    pub fn parse_url(&self, url: &str) -> Option<R> {
        match self.resolve(url) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "URL not resolved");
                None
            }
        }
    }

    /// Resolve `url` and invoke the matching handler.
    pub fn resolve(&self, url: &str) -> Result<R, ResolveError> {
        let hash_path = split_fragment(url)?;
        let (index, params) = self.lookup(hash_path)?;

        tracing::debug!(
            route = index,
            pattern = %self.table.patterns()[index].pattern(),
            params = params.len(),
            "Route matched"
        );

        self.handlers[index].call(&params)
    }

    /// Find the route for `hash_path` and convert its parameters, without
    /// invoking the handler.
    pub fn lookup(&self, hash_path: &str) -> Result<(usize, Params), ResolveError> {
        let found = self
            .table
            .find(hash_path)
            .ok_or_else(|| ResolveError::NoMatch(hash_path.to_owned()))?;

        let compiled = &self.table.patterns()[found.index];
        let mut params = Params::new();
        for ((name, kind), raw) in compiled.params().zip(&found.params) {
            let value = ParamValue::parse(kind, raw).ok_or_else(|| ResolveError::ParamConversion {
                name: name.to_owned(),
                value: raw.clone(),
                expected: kind.to_string(),
            })?;
            params.push(Param {
                name: name.to_owned(),
                value,
            });
        }

        Ok((found.index, params))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Registered patterns, in precedence order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.patterns().iter().map(|compiled| compiled.pattern())
    }
}

/// Collects routes in declaration order.
#[derive(Debug)]
pub struct RouterBuilder<R> {
    routes: Vec<(String, BoxedHandler<R>)>,
}

impl<R: 'static> RouterBuilder<R> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Bind `handler` to `pattern`.
    pub fn route<F, Args>(self, pattern: impl Into<String>, handler: F) -> Self
    where
        F: Handler<Args, R>,
        Args: 'static,
    {
        self.route_boxed(pattern, BoxedHandler::new(handler))
    }

    /// Bind a handler that receives every parameter `pattern` declares.
    pub fn route_params<F>(self, pattern: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Params) -> R + 'static,
    {
        self.route_boxed(pattern, BoxedHandler::any_arity(handler))
    }

    pub fn route_boxed(mut self, pattern: impl Into<String>, handler: BoxedHandler<R>) -> Self {
        self.routes.push((pattern.into(), handler));
        self
    }

    pub fn build(self) -> Result<Router<R>, RouterError> {
        Router::new(self.routes)
    }
}

impl<R: 'static> Default for RouterBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::pattern::PatternError;

    fn router() -> Router<String> {
        Router::builder()
            .route("/", || "H0".to_string())
            .route("/a/:id", |id: String| format!("H1({})", id))
            .route("/page/:n:int", |n: i64| format!("page {}", n + 1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_split_fragment() {
        assert_eq!(split_fragment("page#/a/42"), Ok("/a/42"));
        assert_eq!(split_fragment("#"), Ok(""));
        assert_eq!(split_fragment("foo"), Err(ResolveError::MissingFragment));
        assert_eq!(split_fragment("a#b#c"), Err(ResolveError::MultipleFragments));
    }

    #[test]
    fn test_resolve() {
        let router = router();
        assert_eq!(router.resolve("page#/a/42"), Ok("H1(42)".to_string()));
        assert_eq!(router.resolve("page#/"), Ok("H0".to_string()));
        assert_eq!(
            router.resolve("page#/zzz"),
            Err(ResolveError::NoMatch("/zzz".into()))
        );
    }

    #[test]
    fn test_integer_param() {
        let router = router();
        assert_eq!(router.parse_url("x#/page/9"), Some("page 10".to_string()));

        // matches the pattern, fails conversion
        assert!(matches!(
            router.resolve("x#/page/nine"),
            Err(ResolveError::ParamConversion { ref expected, .. }) if expected == "integer"
        ));
        assert_eq!(router.parse_url("x#/page/nine"), None);
    }

    #[test]
    fn test_lookup_params() {
        let router = router();
        let (index, params) = router.lookup("/a/xyz/").unwrap();
        assert_eq!(index, 1);
        assert_eq!(params.by_name("id"), Some(&ParamValue::Text("xyz".into())));
    }

    #[test]
    fn test_build_errors() {
        let empty: Vec<(String, BoxedHandler<()>)> = Vec::new();
        assert!(matches!(Router::new(empty), Err(RouterError::NoRoutes)));

        let err = Router::builder()
            .route("/a/:id", || ())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::ArityMismatch { expected: 1, actual: 0, .. }
        ));

        let err = Router::builder()
            .route("/a", || ())
            .route("/a", || ())
            .build()
            .unwrap_err();
        assert!(matches!(err, RouterError::DuplicatePattern(p) if p == "/a"));

        let err = Router::builder().route("/a/:", || ()).build().unwrap_err();
        assert!(matches!(
            err,
            RouterError::Pattern(PatternError::UnnamedParam { .. })
        ));

        let err = Router::builder()
            .route("/v(1|2)/:id", |id: String| id)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::GroupCount { expected: 1, actual: 2, .. }
        ));
    }

    #[test]
    fn test_route_params_takes_pattern_arity() {
        let router = Router::builder()
            .route_params("/", |p: &Params| p.len())
            .route_params("/a/:x/:y:int", |p: &Params| p.len())
            .build()
            .unwrap();
        assert_eq!(router.parse_url("x#/"), Some(0));
        assert_eq!(router.parse_url("x#/a/b/3"), Some(2));

        let err = Router::builder()
            .route_boxed("/a/:x", BoxedHandler::raw(2, |p: &Params| p.len()))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::ArityMismatch { expected: 1, actual: 2, .. }
        ));
    }

    #[test]
    fn test_patterns_in_order() {
        let router = router();
        let patterns: Vec<_> = router.patterns().collect();
        assert_eq!(patterns, vec!["/", "/a/:id", "/page/:n:int"]);
    }
}
