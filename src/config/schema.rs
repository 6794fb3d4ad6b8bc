//! The assembled, not-yet-validated configuration.

use serde::Serialize;

use crate::config::directive::{Directive, RangeExpr};

/// A raw (`raw:`) rewrite as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRewrite {
    pub source: String,
    pub destination: String,
}

/// A version-scoped rewrite as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedRewrite {
    #[serde(skip)]
    pub range: RangeExpr,
    pub source: String,
    pub destination: String,
}

/// Everything the rule file declares, in declaration order, before semantic
/// validation. Patterns still carry their `${prefix}`/`${base}` placeholders.
///
/// Repeated `define: prefix`/`define: base` lines follow last-wins semantics;
/// repeated `define: versions` lines extend the list; a repeated `symlink:`
/// for the same alias re-points it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RedirectConfig {
    pub prefix: Option<String>,
    pub base: Option<String>,
    pub versions: Vec<String>,
    pub symlinks: Vec<(String, String)>,
    pub raw_rewrites: Vec<RawRewrite>,
    pub scoped_rewrites: Vec<ScopedRewrite>,
}

impl RedirectConfig {
    pub fn from_directives(directives: impl IntoIterator<Item = Directive>) -> Self {
        let mut config = Self::default();
        for directive in directives {
            match directive {
                Directive::DefinePrefix(prefix) => config.prefix = Some(prefix),
                Directive::DefineBase(base) => config.base = Some(base),
                Directive::DefineVersions(labels) => config.versions.extend(labels),
                Directive::Symlink { alias, target } => config.symlinks.push((alias, target)),
                Directive::Raw {
                    source,
                    destination,
                } => config.raw_rewrites.push(RawRewrite {
                    source,
                    destination,
                }),
                Directive::Scoped {
                    range,
                    source,
                    destination,
                } => config.scoped_rewrites.push(ScopedRewrite {
                    range,
                    source,
                    destination,
                }),
            }
        }
        config
    }
}
