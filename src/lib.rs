//! Versioned documentation redirect resolver.
//!
//! Loads a declarative, line-oriented redirect rule file (governed path
//! prefix, destination base URL, version list, symlink alias, raw and
//! version-scoped rewrites) and resolves incoming documentation paths to the
//! destination URL a hosting server should redirect to.
//!
//! The hosting server owns HTTP semantics, TLS and serving non-redirected
//! content; this crate only answers `resolve(path) -> destination | not
//! found` over an immutable, atomically reloadable rule snapshot.

pub mod config;
pub mod observability;
pub mod resolver;
pub mod rules;
pub mod version;

pub use config::{load_config, load_from_str, ConfigError, ConfigWatcher};
pub use resolver::{ResolveError, ResolvedRedirect, Resolver, SharedResolver};
pub use rules::{RuleTable, VersionRange};
pub use version::VersionRegistry;
