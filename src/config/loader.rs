//! Rule file loading and compilation.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::directive::{parse_line, RangeExpr};
use crate::config::schema::RedirectConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::resolver::Resolver;
use crate::rules::{RuleTable, VersionRange};
use crate::version::VersionRegistry;

/// Error type for configuration loading. Every variant is fatal at load
/// time: the caller must keep (or abort to) its previous rule set.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the rule file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A directive line could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Semantic validation rejected the rule set.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load, validate, and compile a rule file into a resolver.
pub fn load_config(path: &Path) -> Result<Resolver, ConfigError> {
    let content = fs::read_to_string(path)?;
    load_from_str(&content)
}

/// Same as [`load_config`], from already-read text.
pub fn load_from_str(content: &str) -> Result<Resolver, ConfigError> {
    let mut directives = Vec::new();
    for (number, line) in content.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(directive)) => directives.push(directive),
            Ok(None) => {}
            Err(message) => {
                return Err(ConfigError::Parse {
                    line: number + 1,
                    message,
                })
            }
        }
    }

    let config = RedirectConfig::from_directives(directives);
    validate_config(&config).map_err(ConfigError::Validation)?;
    compile(&config)
}

/// Compile a validated configuration: expand `${prefix}`/`${base}` and build
/// the registry and rule table.
///
/// Registration failures are unreachable after validation but still surface
/// as validation errors rather than panics.
fn compile(config: &RedirectConfig) -> Result<Resolver, ConfigError> {
    let prefix = config
        .prefix
        .as_deref()
        .unwrap_or_default()
        .trim_matches('/')
        .to_string();
    let base = config
        .base
        .as_deref()
        .unwrap_or_default()
        .replace("${prefix}", &prefix);

    let mut registry = VersionRegistry::new();
    for label in &config.versions {
        registry.register(label).map_err(validation)?;
    }
    for (alias, target) in &config.symlinks {
        registry.bind_alias(alias, target).map_err(validation)?;
    }

    let expand = |pattern: &str| {
        pattern
            .replace("${prefix}", &prefix)
            .replace("${base}", &base)
    };

    let mut table = RuleTable::new();
    for rewrite in &config.raw_rewrites {
        table
            .add_generic(&expand(&rewrite.source), &expand(&rewrite.destination))
            .map_err(validation)?;
    }
    for rewrite in &config.scoped_rewrites {
        let range = match &rewrite.range {
            RangeExpr::All => VersionRange::All,
            RangeExpr::UpTo(label) => VersionRange::UpTo(known_version(&registry, label)?),
            RangeExpr::AllExcept(label) => {
                VersionRange::AllExcept(known_version(&registry, label)?)
            }
        };
        table
            .add_scoped(&expand(&rewrite.source), &expand(&rewrite.destination), range)
            .map_err(validation)?;
    }

    Ok(Resolver::new(prefix, base, registry, table))
}

fn known_version(
    registry: &VersionRegistry,
    label: &str,
) -> Result<crate::version::Version, ConfigError> {
    registry.get(label).cloned().ok_or_else(|| {
        ConfigError::Validation(vec![ValidationError::UnknownRangeVersion(label.to_string())])
    })
}

fn validation(error: impl Into<ValidationError>) -> ConfigError {
    ConfigError::Validation(vec![error.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RULES: &str = "\
# Go driver documentation redirects
define: prefix docs/drivers/go
define: base https://www.example.com/${prefix}
define: versions v1.7 v1.8 v1.9 v1.10 v1.11 v1.12 master
symlink: current -> v1.12

raw: ${prefix}/ -> ${base}/current/
raw: ${prefix}/${version}/ -> ${base}/${version}/
[*-master]: ${prefix}/${version}/usage-examples/ -> ${base}/${version}/usage-examples/
[*-v1.11]: ${prefix}/${version}/fundamentals/logging/ -> ${base}/${version}/
";

    #[test]
    fn test_load_and_resolve_end_to_end() {
        let resolver = load_from_str(RULES).unwrap();
        assert_eq!(resolver.prefix(), "docs/drivers/go");
        assert_eq!(resolver.base(), "https://www.example.com/docs/drivers/go");

        let hit = resolver
            .resolve("docs/drivers/go/v1.11/fundamentals/logging/foo")
            .unwrap();
        assert_eq!(
            hit.destination,
            "https://www.example.com/docs/drivers/go/v1.11/foo"
        );

        // Past the cutoff the logging rule no longer applies.
        let hit = resolver
            .resolve("docs/drivers/go/v1.12/fundamentals/logging/foo")
            .unwrap();
        assert_eq!(
            hit.destination,
            "https://www.example.com/docs/drivers/go/v1.12/fundamentals/logging/foo"
        );
    }

    #[test]
    fn test_alias_resolves_like_its_target() {
        let resolver = load_from_str(RULES).unwrap();
        let via_alias = resolver
            .resolve("docs/drivers/go/current/usage-examples/find")
            .unwrap();
        let direct = resolver
            .resolve("docs/drivers/go/v1.12/usage-examples/find")
            .unwrap();
        assert_eq!(via_alias.destination, direct.destination);
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let err = load_from_str("define: prefix docs\nnonsense line\n").unwrap_err();
        match err {
            ConfigError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn test_validation_errors_abort_the_load() {
        let err = load_from_str("define: prefix docs\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert!(errors.contains(&ValidationError::MissingBase));
                assert!(errors.contains(&ValidationError::NoVersions));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RULES.as_bytes()).unwrap();

        let resolver = load_config(file.path()).unwrap();
        assert!(resolver
            .resolve("docs/drivers/go/v1.7/usage-examples/insert")
            .is_ok());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/redirects.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
