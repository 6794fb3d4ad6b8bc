//! Placeholder scanning for source patterns and destination templates.
//!
//! Placeholders use the `${name}` form. Which names are legal depends on the
//! processing stage: raw directives may still reference `${prefix}` and
//! `${base}`, while patterns handed to the rule table have those expanded and
//! may only carry `${version}`.

/// Number of `${version}` occurrences in a pattern.
pub fn version_placeholders(pattern: &str) -> usize {
    pattern.matches("${version}").count()
}

/// Scan for placeholder syntax errors.
///
/// Returns a human-readable reason for the first unterminated placeholder or
/// placeholder whose name is not in `allowed`, or `None` if the pattern is
/// well-formed.
pub fn placeholder_error(pattern: &str, allowed: &[&str]) -> Option<String> {
    let mut rest = pattern;
    while let Some(start) = rest.find("${") {
        let tail = &rest[start + 2..];
        let end = match tail.find('}') {
            Some(end) => end,
            None => return Some("unterminated placeholder".to_string()),
        };
        let name = &tail[..end];
        if !allowed.contains(&name) {
            return Some(format!("unknown placeholder `${{{name}}}`"));
        }
        rest = &tail[end + 1..];
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_placeholder_count() {
        assert_eq!(version_placeholders("docs/go/fundamentals/"), 0);
        assert_eq!(version_placeholders("docs/go/${version}/"), 1);
        assert_eq!(version_placeholders("${version}/${version}"), 2);
    }

    #[test]
    fn test_well_formed_patterns_pass() {
        assert_eq!(placeholder_error("docs/go/v1.11/", &["version"]), None);
        assert_eq!(
            placeholder_error("${base}/${version}/", &["base", "version"]),
            None
        );
    }

    #[test]
    fn test_unknown_placeholder() {
        let reason = placeholder_error("${base}/${versoin}/", &["base", "version"]).unwrap();
        assert!(reason.contains("${versoin}"));
    }

    #[test]
    fn test_unterminated_placeholder() {
        let reason = placeholder_error("docs/${version/foo", &["version"]).unwrap();
        assert_eq!(reason, "unterminated placeholder");
    }
}
