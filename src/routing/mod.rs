//! Static route tables mapping URL paths to views.

use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A path pattern such as `/movie/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

/// Values captured by the `:param` segments of a pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parses a captured value, `None` if missing or malformed.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name)?.parse().ok()
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty())
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = path_segments(pattern)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches a concrete path, ignoring query, fragment and trailing slash.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = path_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(RouteParams(params))
    }
}

#[derive(Debug, Clone)]
pub struct RouteDef<V> {
    pub name: &'static str,
    pub pattern: RoutePattern,
    pub view: V,
    pub requires_auth: bool,
}

/// A resolved navigation target.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a, V> {
    pub route: &'a RouteDef<V>,
    pub params: RouteParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
}

pub struct Router<V> {
    routes: Vec<RouteDef<V>>,
}

impl<V> Default for Router<V> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<V> Router<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, name: &'static str, pattern: &str, view: V) -> Self {
        self.routes.push(RouteDef {
            name,
            pattern: RoutePattern::parse(pattern),
            view,
            requires_auth: false,
        });
        self
    }

    pub fn protected_route(mut self, name: &'static str, pattern: &str, view: V) -> Self {
        self.routes.push(RouteDef {
            name,
            pattern: RoutePattern::parse(pattern),
            view,
            requires_auth: true,
        });
        self
    }

    pub fn routes(&self) -> &[RouteDef<V>] {
        &self.routes
    }

    /// First route, in declaration order, whose pattern matches `path`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, V>> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(path)
                .map(|params| RouteMatch { route, params })
        })
    }

    /// Navigation guard. Always proceeds: routes flagged `requires_auth` are
    /// not enforced here, the backend's 401 is the only real gate.
    pub fn guard(&self, target: &RouteMatch<'_, V>, authenticated: bool) -> GuardDecision {
        if target.route.requires_auth && !authenticated {
            debug!(
                "Entering protected route {} without a session, not enforced",
                target.route.name
            );
        }
        GuardDecision::Proceed
    }
}
