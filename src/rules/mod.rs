//! Rewrite rule subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed directives (raw + scoped rewrites)
//!     → pattern.rs (placeholder well-formedness)
//!     → table.rs (register in declaration order)
//!     → Frozen RuleTable, shared immutably with the resolver
//! ```
//!
//! # Design Decisions
//! - Rules compiled at load time, immutable at runtime
//! - Placeholder mismatches are caught at registration, never at request time
//! - No regex: source patterns are literal directory prefixes with a single
//!   `${version}` slot, so matching stays O(n)
//! - Precedence is total: scoped beats generic, narrower range beats wider,
//!   later declaration breaks any remaining tie

pub mod pattern;
pub mod range;
pub mod table;

pub use range::VersionRange;
pub use table::{Rule, RuleError, RuleKind, RuleTable};
