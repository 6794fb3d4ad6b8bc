//! Semantic configuration validation.
//!
//! # Responsibilities
//! - Check referential integrity (symlinks and ranges name known versions)
//! - Check placeholder well-formedness per rule kind
//! - Check the expanded base resolves to a usable URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RedirectConfig → Result<(), Vec<_>>
//! - Runs before any rule set is accepted into the system

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::directive::RangeExpr;
use crate::config::schema::RedirectConfig;
use crate::rules::pattern::{placeholder_error, version_placeholders};
use crate::rules::RuleError;
use crate::version::RegistryError;

/// One semantic defect in a rule file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No `define: prefix` directive.
    #[error("missing `define: prefix`")]
    MissingPrefix,

    /// No `define: base` directive.
    #[error("missing `define: base`")]
    MissingBase,

    /// No versions declared.
    #[error("no versions declared")]
    NoVersions,

    /// The same label declared twice.
    #[error("duplicate version `{0}`")]
    DuplicateVersion(String),

    /// A symlink points at an undeclared version.
    #[error("symlink `{alias}` targets unknown version `{target}`")]
    UnknownSymlinkTarget { alias: String, target: String },

    /// A range expression names an undeclared version.
    #[error("range references unknown version `{0}`")]
    UnknownRangeVersion(String),

    /// A pattern or template violates the placeholder conventions.
    #[error("malformed pattern `{pattern}`: {reason}")]
    MalformedPattern { pattern: String, reason: String },

    /// The expanded base is not a usable URL.
    #[error("base `{url}` is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Registry rejection surfaced while compiling a validated config.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Rule-table rejection surfaced while compiling a validated config.
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Placeholders legal in raw directive text, before expansion.
const DECLARED: &[&str] = &["prefix", "base", "version"];

/// Validate an assembled configuration, collecting every defect.
pub fn validate_config(config: &RedirectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.prefix.is_none() {
        errors.push(ValidationError::MissingPrefix);
    }
    if config.base.is_none() {
        errors.push(ValidationError::MissingBase);
    }
    if config.versions.is_empty() {
        errors.push(ValidationError::NoVersions);
    }

    let mut seen = HashSet::new();
    for label in &config.versions {
        if !seen.insert(label.as_str()) {
            errors.push(ValidationError::DuplicateVersion(label.clone()));
        }
    }

    for (alias, target) in &config.symlinks {
        if !seen.contains(target.as_str()) {
            errors.push(ValidationError::UnknownSymlinkTarget {
                alias: alias.clone(),
                target: target.clone(),
            });
        }
    }

    for rewrite in &config.raw_rewrites {
        check_pattern(&rewrite.source, &mut errors);
        check_pattern(&rewrite.destination, &mut errors);
        let slots = version_placeholders(&rewrite.source);
        if slots > 1 {
            errors.push(ValidationError::MalformedPattern {
                pattern: rewrite.source.clone(),
                reason: "source may contain at most one ${version}".to_string(),
            });
        }
        if slots == 0 && version_placeholders(&rewrite.destination) != 0 {
            errors.push(ValidationError::MalformedPattern {
                pattern: rewrite.destination.clone(),
                reason: "destination references ${version} but the source is pinned".to_string(),
            });
        }
    }

    for rewrite in &config.scoped_rewrites {
        check_pattern(&rewrite.source, &mut errors);
        check_pattern(&rewrite.destination, &mut errors);
        if version_placeholders(&rewrite.source) != 1 {
            errors.push(ValidationError::MalformedPattern {
                pattern: rewrite.source.clone(),
                reason: "scoped rewrite source must contain exactly one ${version}".to_string(),
            });
        }
        match &rewrite.range {
            RangeExpr::All => {}
            RangeExpr::UpTo(label) | RangeExpr::AllExcept(label) => {
                if !seen.contains(label.as_str()) {
                    errors.push(ValidationError::UnknownRangeVersion(label.clone()));
                }
            }
        }
    }

    if let Some(base) = &config.base {
        let expanded = base.replace("${prefix}", config.prefix.as_deref().unwrap_or(""));
        match Url::parse(&expanded) {
            Ok(_) => {}
            // Site-relative bases are fine; the hosting server roots them.
            Err(url::ParseError::RelativeUrlWithoutBase) if expanded.starts_with('/') => {}
            Err(e) => errors.push(ValidationError::InvalidBaseUrl {
                url: expanded,
                reason: e.to_string(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_pattern(pattern: &str, errors: &mut Vec<ValidationError>) {
    if let Some(reason) = placeholder_error(pattern, DECLARED) {
        errors.push(ValidationError::MalformedPattern {
            pattern: pattern.to_string(),
            reason,
        });
    }
}
