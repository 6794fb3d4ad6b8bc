//! Version labels, ordering, and the alias-bearing registry.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Errors produced by registry operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The label was already registered.
    #[error("duplicate version `{0}`")]
    DuplicateVersion(String),

    /// The alias name is not bound to any version.
    #[error("unknown alias `{0}`")]
    UnknownAlias(String),

    /// An alias was pointed at a label that is not registered.
    #[error("alias `{alias}` targets unknown version `{target}`")]
    UnknownAliasTarget { alias: String, target: String },
}

/// A documentation version label, e.g. `v1.11` or `master`.
///
/// Ordered by release chronology: numeric `vX.Y` labels compare numerically
/// (`v1.9` < `v1.10`), and `master` compares greater than everything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    label: String,
}

/// Sort key extracted from a label.
///
/// Non-numeric labels other than `master` sort between the numeric releases
/// and `master`, lexically among themselves.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum OrderKey<'a> {
    Numeric(u64, u64, u64),
    Other(&'a str),
    Master,
}

impl Version {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// The label exactly as declared.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn order_key(&self) -> OrderKey<'_> {
        if self.label == "master" {
            return OrderKey::Master;
        }
        let digits = self.label.strip_prefix('v').unwrap_or(&self.label);
        let mut parts = digits.splitn(3, '.').map(|p| p.parse::<u64>());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), None) => OrderKey::Numeric(major, minor, 0),
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch))) => {
                OrderKey::Numeric(major, minor, patch)
            }
            (Some(Ok(major)), None, None) => OrderKey::Numeric(major, 0, 0),
            _ => OrderKey::Other(&self.label),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key()
            .cmp(&other.order_key())
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The ordered set of known versions plus symlink aliases.
///
/// Declaration order is preserved for display; range predicates and
/// `ordered_versions` use chronological order instead.
#[derive(Debug, Clone, Default)]
pub struct VersionRegistry {
    versions: Vec<Version>,
    aliases: BTreeMap<String, Version>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a version label. Fails if the label is already known.
    pub fn register(&mut self, label: &str) -> Result<(), RegistryError> {
        if self.is_known(label) {
            return Err(RegistryError::DuplicateVersion(label.to_string()));
        }
        self.versions.push(Version::new(label));
        Ok(())
    }

    /// True if the label is a registered version.
    pub fn is_known(&self, label: &str) -> bool {
        self.versions.iter().any(|v| v.label == label)
    }

    /// Look up a registered version by label.
    pub fn get(&self, label: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.label == label)
    }

    /// Bind (or re-point) an alias to a registered version.
    pub fn bind_alias(&mut self, alias: &str, target: &str) -> Result<(), RegistryError> {
        let version = self
            .get(target)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            })?;
        self.aliases.insert(alias.to_string(), version);
        Ok(())
    }

    /// Resolve an alias name to its bound version.
    pub fn resolve_alias(&self, name: &str) -> Result<&Version, RegistryError> {
        self.aliases
            .get(name)
            .ok_or_else(|| RegistryError::UnknownAlias(name.to_string()))
    }

    /// All versions, oldest first, with `master` last.
    pub fn ordered_versions(&self) -> Vec<&Version> {
        let mut ordered: Vec<&Version> = self.versions.iter().collect();
        ordered.sort();
        ordered
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
