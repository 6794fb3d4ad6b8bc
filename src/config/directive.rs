//! Line-oriented directive parsing.
//!
//! The rule file format, one directive per line:
//!
//! ```text
//! define: prefix docs/drivers/go
//! define: base https://www.example.com/${prefix}
//! define: versions v1.7 v1.8 v1.11 v1.12 master
//! symlink: current -> v1.12
//! raw: ${prefix}/ -> ${base}/current/
//! [*-v1.11]: ${prefix}/${version}/fundamentals/logging/ -> ${base}/${version}/
//! ```
//!
//! Blank lines and `#` comments are skipped. Range expressions: `*` (all
//! versions), `*-X` (all versions through X inclusive), `!X` (all versions
//! except exactly X).

/// A version range expression, by label. Labels are resolved against the
/// registry later, during validation and compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeExpr {
    All,
    UpTo(String),
    AllExcept(String),
}

/// One parsed configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    DefinePrefix(String),
    DefineBase(String),
    DefineVersions(Vec<String>),
    Symlink { alias: String, target: String },
    Raw { source: String, destination: String },
    Scoped {
        range: RangeExpr,
        source: String,
        destination: String,
    },
}

/// Parse a single line. `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Directive>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if let Some(rest) = line.strip_prefix("define:") {
        return parse_define(rest.trim()).map(Some);
    }
    if let Some(rest) = line.strip_prefix("symlink:") {
        let (alias, target) = split_arrow(rest)?;
        return Ok(Some(Directive::Symlink {
            alias: alias.to_string(),
            target: target.to_string(),
        }));
    }
    if let Some(rest) = line.strip_prefix("raw:") {
        let (source, destination) = split_arrow(rest)?;
        return Ok(Some(Directive::Raw {
            source: source.to_string(),
            destination: destination.to_string(),
        }));
    }
    if let Some(rest) = line.strip_prefix('[') {
        let (expr, rest) = rest
            .split_once("]:")
            .ok_or_else(|| "expected `]:` closing the range expression".to_string())?;
        let (source, destination) = split_arrow(rest)?;
        return Ok(Some(Directive::Scoped {
            range: parse_range(expr.trim())?,
            source: source.to_string(),
            destination: destination.to_string(),
        }));
    }

    Err(format!("unrecognized directive `{line}`"))
}

fn parse_define(rest: &str) -> Result<Directive, String> {
    let (key, value) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("`define: {rest}` is missing a value"))?;
    let value = value.trim();
    match key {
        "prefix" => Ok(Directive::DefinePrefix(value.to_string())),
        "base" => Ok(Directive::DefineBase(value.to_string())),
        "versions" => Ok(Directive::DefineVersions(
            value.split_whitespace().map(str::to_string).collect(),
        )),
        other => Err(format!("unknown define key `{other}`")),
    }
}

fn parse_range(expr: &str) -> Result<RangeExpr, String> {
    if expr == "*" {
        return Ok(RangeExpr::All);
    }
    if let Some(label) = expr.strip_prefix("*-") {
        if label.is_empty() {
            return Err("`*-` range is missing a version".to_string());
        }
        return Ok(RangeExpr::UpTo(label.to_string()));
    }
    if let Some(label) = expr.strip_prefix('!') {
        if label.is_empty() {
            return Err("`!` range is missing a version".to_string());
        }
        return Ok(RangeExpr::AllExcept(label.to_string()));
    }
    Err(format!("unrecognized range expression `{expr}`"))
}

fn split_arrow(rest: &str) -> Result<(&str, &str), String> {
    let (left, right) = rest
        .split_once("->")
        .ok_or_else(|| "expected `->` between source and destination".to_string())?;
    let left = left.trim();
    let right = right.trim();
    if left.is_empty() || right.is_empty() {
        return Err("empty source or destination".to_string());
    }
    Ok((left, right))
}
