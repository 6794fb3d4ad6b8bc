//! The ordered rewrite rule table.

use thiserror::Error;

use crate::rules::pattern::{placeholder_error, version_placeholders};
use crate::rules::range::VersionRange;

/// Errors from rule registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// A source pattern or destination template violates the placeholder
    /// conventions for its rule kind.
    #[error("malformed pattern `{pattern}`: {reason}")]
    MalformedPattern { pattern: String, reason: String },
}

/// How a rule applies across the known versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Literal rewrite with no `${version}` slot; version-independent.
    Pinned,
    /// Version-generic rewrite: one `${version}` slot, admits every version.
    Generic,
    /// Version-scoped rewrite: one `${version}` slot, range-restricted.
    Scoped(VersionRange),
}

/// A single rewrite in declaration order.
///
/// Patterns reaching the table have `${prefix}` and `${base}` already
/// expanded; only `${version}` remains for request-time substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    source: String,
    destination: String,
    kind: RuleKind,
    index: usize,
}

impl Rule {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Position in declaration order; unique, so it is the final precedence
    /// tiebreaker.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered sequence of rewrites. Append-only while loading, frozen afterward.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a `raw:` rewrite.
    ///
    /// A source without `${version}` is pinned (literal match); a source with
    /// exactly one `${version}` applies across every known version. Anything
    /// else is malformed, as is a destination referencing `${version}` when
    /// the source does not.
    pub fn add_generic(&mut self, source: &str, destination: &str) -> Result<(), RuleError> {
        check_placeholders(source)?;
        check_placeholders(destination)?;
        let kind = match version_placeholders(source) {
            0 => {
                if version_placeholders(destination) != 0 {
                    return Err(RuleError::MalformedPattern {
                        pattern: destination.to_string(),
                        reason: "destination references ${version} but the source is pinned"
                            .to_string(),
                    });
                }
                RuleKind::Pinned
            }
            1 => {
                check_destination_slots(destination)?;
                RuleKind::Generic
            }
            _ => {
                return Err(RuleError::MalformedPattern {
                    pattern: source.to_string(),
                    reason: "source may contain at most one ${version}".to_string(),
                })
            }
        };
        self.push(source, destination, kind);
        Ok(())
    }

    /// Register a version-scoped rewrite. The source must carry exactly one
    /// `${version}`; the destination at most one.
    pub fn add_scoped(
        &mut self,
        source: &str,
        destination: &str,
        range: VersionRange,
    ) -> Result<(), RuleError> {
        check_placeholders(source)?;
        check_placeholders(destination)?;
        if version_placeholders(source) != 1 {
            return Err(RuleError::MalformedPattern {
                pattern: source.to_string(),
                reason: "scoped rewrite source must contain exactly one ${version}".to_string(),
            });
        }
        check_destination_slots(destination)?;
        self.push(source, destination, RuleKind::Scoped(range));
        Ok(())
    }

    fn push(&mut self, source: &str, destination: &str, kind: RuleKind) {
        let index = self.rules.len();
        self.rules.push(Rule {
            source: source.trim_start_matches('/').to_string(),
            destination: destination.to_string(),
            kind,
            index,
        });
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn check_placeholders(pattern: &str) -> Result<(), RuleError> {
    if let Some(reason) = placeholder_error(pattern, &["version"]) {
        return Err(RuleError::MalformedPattern {
            pattern: pattern.to_string(),
            reason,
        });
    }
    Ok(())
}

fn check_destination_slots(destination: &str) -> Result<(), RuleError> {
    if version_placeholders(destination) > 1 {
        return Err(RuleError::MalformedPattern {
            pattern: destination.to_string(),
            reason: "destination may reference ${version} at most once".to_string(),
        });
    }
    Ok(())
}
