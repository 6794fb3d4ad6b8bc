//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! rule file (line-oriented directives)
//!     → directive.rs (parse each line)
//!     → schema.rs (assemble RedirectConfig)
//!     → validation.rs (semantic checks, all errors collected)
//!     → loader.rs (expand ${prefix}/${base}, compile Resolver)
//!     → shared via SharedResolver to all callers
//!
//! On reload signal:
//!     watcher.rs detects change
//!     → loader.rs loads and compiles a new Resolver
//!     → atomic swap of the snapshot
//!     → in-flight resolutions keep the snapshot they started with
//! ```
//!
//! # Design Decisions
//! - The rule set is immutable once loaded; changes require a full reload
//! - Any load-time error is fatal: the process never serves a partially
//!   valid table
//! - Validation separates syntactic (directive parser) from semantic checks
//!   and reports every error, not just the first

pub mod directive;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use directive::{Directive, RangeExpr};
pub use loader::{load_config, load_from_str, ConfigError};
pub use schema::RedirectConfig;
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
