//! Resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming documentation path
//!     → engine.rs (prefix strip, version token extraction)
//!     → rule evaluation (directory-prefix match, range predicates)
//!     → precedence selection
//!     → Return: ResolvedRedirect or explicit NotFound
//!
//! On configuration reload:
//!     loader produces a fresh Resolver
//!     → snapshot.rs (atomic swap of Arc<Resolver>)
//!     → in-flight resolutions keep the snapshot they loaded
//! ```
//!
//! # Design Decisions
//! - Resolution is a pure function: no mutation, no I/O
//! - Deterministic: same path and same snapshot always yield the same output
//! - Explicit NotFound rather than a partial or guessed destination

pub mod engine;
pub mod snapshot;

pub use engine::{ResolveError, ResolvedRedirect, Resolver};
pub use snapshot::SharedResolver;
