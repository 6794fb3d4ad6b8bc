//! Version registry subsystem.
//!
//! # Data Flow
//! ```text
//! `define: versions ...` directive
//!     → registry.rs (register each label in declared order)
//! `symlink: alias -> version` directive
//!     → registry.rs (bind alias to a registered version)
//!
//! At resolve time:
//!     path token → alias lookup or direct version lookup
//!     range predicates → ordered_versions() (chronological, master last)
//! ```
//!
//! # Design Decisions
//! - Versions are immutable once registered; duplicates are rejected
//! - `master` always orders after every numeric label (it is not numeric)
//! - The alias is a single indirection cell, re-pointed only by explicit
//!   redeclaration, never implicitly

pub mod registry;

pub use registry::{RegistryError, Version, VersionRegistry};
