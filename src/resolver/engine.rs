//! The redirect resolution engine.

use serde::Serialize;
use thiserror::Error;

use crate::rules::{Rule, RuleKind, RuleTable};
use crate::version::VersionRegistry;

/// Errors from path resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No redirect applies to the path. An expected outcome, not a fault:
    /// the hosting server decides what to serve instead.
    #[error("no redirect applies to `{path}`")]
    NotFound { path: String },
}

/// The outcome of a successful resolution. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRedirect {
    /// The path exactly as it was asked for.
    pub path: String,
    /// The destination URL the hosting server should redirect to.
    pub destination: String,
}

/// Immutable resolver over a loaded registry and rule table.
///
/// Construction freezes the configuration; every `resolve` call is a pure,
/// bounded computation over it.
#[derive(Debug, Clone)]
pub struct Resolver {
    prefix: String,
    base: String,
    registry: VersionRegistry,
    table: RuleTable,
}

struct Candidate<'a> {
    rule: &'a Rule,
    scoped: bool,
    /// Number of versions the rule admits; smaller = more specific.
    width: usize,
    suffix: &'a str,
}

impl Candidate<'_> {
    /// Precedence: scoped over generic, then narrower range, then later
    /// declaration. Declaration index is unique, so ordering is total.
    fn beats(&self, other: &Candidate<'_>) -> bool {
        if self.scoped != other.scoped {
            return self.scoped;
        }
        if self.width != other.width {
            return self.width < other.width;
        }
        self.rule.index() > other.rule.index()
    }
}

impl Resolver {
    /// Build a resolver over an already-validated registry and table.
    ///
    /// `prefix` is the root path segment this rule set governs; `base` is the
    /// fully expanded destination base URL.
    pub fn new(
        prefix: impl Into<String>,
        base: impl Into<String>,
        registry: VersionRegistry,
        table: RuleTable,
    ) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_matches('/').to_string(),
            base: base.into(),
            registry,
            table,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Resolve a documentation path to its redirect destination.
    ///
    /// Steps: strip the governed prefix, extract the version token (resolving
    /// the alias transparently), evaluate admissible rules as directory-prefix
    /// matches, pick the winner by precedence, substitute the destination
    /// template, and append the unmatched suffix verbatim.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRedirect, ResolveError> {
        let not_found = || ResolveError::NotFound {
            path: path.to_string(),
        };

        let trimmed = path.trim_start_matches('/');
        let residual =
            match_prefix(&format!("{}/", self.prefix), trimmed).ok_or_else(not_found)?;
        let residual = residual.trim_start_matches('/');

        // The first segment after the prefix may name a version or the alias.
        let token = residual.split('/').next().unwrap_or("");
        let version = self
            .registry
            .resolve_alias(token)
            .ok()
            .or_else(|| self.registry.get(token));

        // Canonical form: alias replaced by its bound version, so aliased and
        // direct paths match identically.
        let match_path = match version {
            Some(v) => format!("{}/{}{}", self.prefix, v.label(), &residual[token.len()..]),
            None => trimmed.to_string(),
        };

        let ordered = self.registry.ordered_versions();
        let mut best: Option<Candidate<'_>> = None;

        for rule in self.table.rules() {
            let candidate = match (rule.kind(), version) {
                (RuleKind::Pinned, _) => {
                    match_prefix(rule.source(), &match_path).map(|suffix| Candidate {
                        rule,
                        scoped: false,
                        width: ordered.len(),
                        suffix,
                    })
                }
                (RuleKind::Generic, Some(v)) => {
                    let instantiated = rule.source().replace("${version}", v.label());
                    match_prefix(&instantiated, &match_path).map(|suffix| Candidate {
                        rule,
                        scoped: false,
                        width: ordered.len(),
                        suffix,
                    })
                }
                (RuleKind::Scoped(range), Some(v)) if range.admits(v) => {
                    let instantiated = rule.source().replace("${version}", v.label());
                    match_prefix(&instantiated, &match_path).map(|suffix| Candidate {
                        rule,
                        scoped: true,
                        width: range.width(&ordered),
                        suffix,
                    })
                }
                _ => None,
            };

            if let Some(candidate) = candidate {
                let replace = match &best {
                    Some(current) => candidate.beats(current),
                    None => true,
                };
                if replace {
                    best = Some(candidate);
                }
            }
        }

        let winner = best.ok_or_else(not_found)?;

        let mut destination = winner.rule.destination().to_string();
        if let Some(v) = version {
            destination = destination.replace("${version}", v.label());
        }
        destination.push_str(winner.suffix);

        Ok(ResolvedRedirect {
            path: path.to_string(),
            destination,
        })
    }
}

/// Directory-boundary prefix match.
///
/// Returns the unmatched suffix when `pattern` is a prefix of `path` ending
/// on a segment boundary. A pattern with a trailing slash also matches the
/// bare directory itself (`a/b/` matches `a/b`).
fn match_prefix<'a>(pattern: &str, path: &'a str) -> Option<&'a str> {
    if let Some(suffix) = path.strip_prefix(pattern) {
        if pattern.ends_with('/') || suffix.is_empty() || suffix.starts_with('/') {
            return Some(suffix);
        }
        return None;
    }
    if let Some(dir) = pattern.strip_suffix('/') {
        if path == dir {
            return Some("");
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::VersionRange;

    const BASE: &str = "https://www.example.com/docs/go";

    fn registry(labels: &[&str]) -> VersionRegistry {
        let mut reg = VersionRegistry::new();
        for label in labels {
            reg.register(label).unwrap();
        }
        reg
    }

    /// Mirrors a typical rule file after `${prefix}`/`${base}` expansion:
    /// broad defaults declared first, narrower exceptions after.
    fn resolver() -> Resolver {
        let mut reg = registry(&["v1.7", "v1.11", "v1.12", "master"]);
        reg.bind_alias("current", "v1.12").unwrap();
        let master = reg.get("master").unwrap().clone();
        let v1_11 = reg.get("v1.11").unwrap().clone();

        let mut table = RuleTable::new();
        table
            .add_generic("docs/go/", &format!("{BASE}/current/"))
            .unwrap();
        table
            .add_generic("docs/go/${version}/", &format!("{BASE}/${{version}}/"))
            .unwrap();
        table
            .add_scoped(
                "docs/go/${version}/usage-examples/",
                &format!("{BASE}/${{version}}/examples/"),
                VersionRange::UpTo(master.clone()),
            )
            .unwrap();
        table
            .add_scoped(
                "docs/go/${version}/fundamentals/",
                &format!("{BASE}/${{version}}/fundamentals/"),
                VersionRange::UpTo(master),
            )
            .unwrap();
        table
            .add_scoped(
                "docs/go/${version}/fundamentals/logging/",
                &format!("{BASE}/${{version}}/"),
                VersionRange::UpTo(v1_11),
            )
            .unwrap();

        Resolver::new("docs/go", BASE, reg, table)
    }

    #[test]
    fn test_scoped_rule_applies_within_range() {
        let r = resolver();
        let hit = r.resolve("docs/go/v1.11/fundamentals/logging/foo").unwrap();
        assert_eq!(hit.destination, format!("{BASE}/v1.11/foo"));
    }

    #[test]
    fn test_scoped_rule_excluded_past_cutoff() {
        // The logging rule stops at v1.11; v1.12 falls through to the wider
        // fundamentals rule instead.
        let r = resolver();
        let hit = r.resolve("docs/go/v1.12/fundamentals/logging/foo").unwrap();
        assert_eq!(
            hit.destination,
            format!("{BASE}/v1.12/fundamentals/logging/foo")
        );
    }

    #[test]
    fn test_excluded_rule_without_fallback_is_not_found() {
        let reg = {
            let mut reg = registry(&["v1.11", "v1.12", "master"]);
            reg.bind_alias("current", "v1.12").unwrap();
            reg
        };
        let cutoff = reg.get("v1.11").unwrap().clone();

        let mut table = RuleTable::new();
        table
            .add_scoped(
                "docs/go/${version}/fundamentals/logging/",
                &format!("{BASE}/${{version}}/"),
                VersionRange::UpTo(cutoff),
            )
            .unwrap();
        let r = Resolver::new("docs/go", BASE, reg, table);

        assert_eq!(
            r.resolve("docs/go/v1.11/fundamentals/logging/foo")
                .unwrap()
                .destination,
            format!("{BASE}/v1.11/foo")
        );
        assert!(matches!(
            r.resolve("docs/go/v1.12/fundamentals/logging/foo"),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn test_generic_rule_applies_for_every_version() {
        let r = resolver();
        for label in ["v1.7", "v1.11", "v1.12", "master"] {
            let hit = r.resolve(&format!("docs/go/{label}/whatsnew")).unwrap();
            assert_eq!(hit.destination, format!("{BASE}/{label}/whatsnew"));
        }
    }

    #[test]
    fn test_alias_transparency() {
        let r = resolver();
        let via_alias = r.resolve("docs/go/current/usage-examples/find").unwrap();
        let direct = r.resolve("docs/go/v1.12/usage-examples/find").unwrap();
        assert_eq!(via_alias.destination, direct.destination);
        assert_eq!(via_alias.destination, format!("{BASE}/v1.12/examples/find"));
    }

    #[test]
    fn test_unknown_prefix_is_not_found() {
        let r = resolver();
        assert!(matches!(
            r.resolve("docs/java/v1.11/foo"),
            Err(ResolveError::NotFound { .. })
        ));
        // A shared leading substring is not a prefix match.
        assert!(matches!(
            r.resolve("docs/golang/v1.11/foo"),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn test_unrecognized_token_uses_pinned_rules_only() {
        let r = resolver();
        let hit = r.resolve("docs/go/about").unwrap();
        assert_eq!(hit.destination, format!("{BASE}/current/about"));
    }

    #[test]
    fn test_scoped_beats_generic() {
        // Both the per-version generic rule and the usage-examples scoped
        // rule match; the scoped one must win.
        let r = resolver();
        let hit = r.resolve("docs/go/v1.12/usage-examples/find").unwrap();
        assert_eq!(hit.destination, format!("{BASE}/v1.12/examples/find"));
    }

    #[test]
    fn test_narrower_range_beats_wider() {
        // fundamentals/ ([*-master], width 4) and fundamentals/logging/
        // ([*-v1.11], width 2) both match; the narrower range wins.
        let r = resolver();
        let hit = r.resolve("docs/go/v1.7/fundamentals/logging/bar").unwrap();
        assert_eq!(hit.destination, format!("{BASE}/v1.7/bar"));
    }

    #[test]
    fn test_later_declaration_wins_among_equals() {
        let mut reg = registry(&["v1.11"]);
        reg.bind_alias("current", "v1.11").unwrap();

        let mut table = RuleTable::new();
        table
            .add_generic("docs/go/", "https://old.example.com/")
            .unwrap();
        table
            .add_generic("docs/go/", "https://new.example.com/")
            .unwrap();
        let r = Resolver::new("docs/go", BASE, reg, table);

        let hit = r.resolve("docs/go/faq").unwrap();
        assert_eq!(hit.destination, "https://new.example.com/faq");
    }

    #[test]
    fn test_suffix_appended_verbatim() {
        let r = resolver();
        let hit = r
            .resolve("docs/go/v1.7/fundamentals/logging/a/b/c.html")
            .unwrap();
        assert_eq!(hit.destination, format!("{BASE}/v1.7/a/b/c.html"));
    }

    #[test]
    fn test_leading_slash_accepted() {
        let r = resolver();
        let hit = r.resolve("/docs/go/v1.12/usage-examples/").unwrap();
        assert_eq!(hit.destination, format!("{BASE}/v1.12/examples/"));
    }

    #[test]
    fn test_bare_version_directory_matches() {
        // `docs/go/${version}/` matches the directory itself.
        let r = resolver();
        let hit = r.resolve("docs/go/v1.12").unwrap();
        assert_eq!(hit.destination, format!("{BASE}/v1.12/"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let r = resolver();
        let first = r.resolve("docs/go/current/usage-examples/find").unwrap();
        let second = r.resolve("docs/go/current/usage-examples/find").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_original_path_is_echoed() {
        let r = resolver();
        let hit = r.resolve("/docs/go/v1.12/faq").unwrap();
        assert_eq!(hit.path, "/docs/go/v1.12/faq");
    }
}
