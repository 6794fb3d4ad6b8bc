//! Version applicability ranges for scoped rewrites.

use crate::version::Version;

/// The set of versions a scoped rewrite applies to.
///
/// Evaluated as a pure predicate over the chronological version order, so
/// `UpTo(v1.11)` admits everything released up to and including `v1.11` and
/// rejects `v1.12` onward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    /// Every known version.
    All,
    /// All versions up to and including the given one.
    UpTo(Version),
    /// All versions except exactly the given one.
    AllExcept(Version),
}

impl VersionRange {
    /// True if the range admits the given version.
    pub fn admits(&self, version: &Version) -> bool {
        match self {
            VersionRange::All => true,
            VersionRange::UpTo(cutoff) => version <= cutoff,
            VersionRange::AllExcept(excluded) => version != excluded,
        }
    }

    /// Number of versions the range admits, used as the specificity measure
    /// for precedence (narrower ranges win).
    pub fn width(&self, ordered: &[&Version]) -> usize {
        ordered.iter().filter(|v| self.admits(v)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::VersionRegistry;

    fn registry() -> VersionRegistry {
        let mut reg = VersionRegistry::new();
        for label in ["v1.7", "v1.8", "v1.9", "v1.10", "v1.11", "v1.12", "master"] {
            reg.register(label).unwrap();
        }
        reg
    }

    #[test]
    fn test_up_to_is_inclusive() {
        let reg = registry();
        let range = VersionRange::UpTo(reg.get("v1.11").unwrap().clone());

        for admitted in ["v1.7", "v1.8", "v1.9", "v1.10", "v1.11"] {
            assert!(range.admits(reg.get(admitted).unwrap()), "{admitted}");
        }
        assert!(!range.admits(reg.get("v1.12").unwrap()));
        assert!(!range.admits(reg.get("master").unwrap()));
    }

    #[test]
    fn test_up_to_master_admits_everything() {
        let reg = registry();
        let range = VersionRange::UpTo(reg.get("master").unwrap().clone());
        for version in reg.ordered_versions() {
            assert!(range.admits(version), "{version}");
        }
    }

    #[test]
    fn test_all_except_rejects_exactly_one() {
        let reg = registry();
        let range = VersionRange::AllExcept(reg.get("v1.12").unwrap().clone());
        assert!(!range.admits(reg.get("v1.12").unwrap()));
        assert!(range.admits(reg.get("v1.11").unwrap()));
        assert!(range.admits(reg.get("master").unwrap()));
    }

    #[test]
    fn test_width() {
        let reg = registry();
        let ordered = reg.ordered_versions();

        assert_eq!(VersionRange::All.width(&ordered), 7);
        assert_eq!(
            VersionRange::UpTo(reg.get("v1.9").unwrap().clone()).width(&ordered),
            3
        );
        assert_eq!(
            VersionRange::AllExcept(reg.get("v1.9").unwrap().clone()).width(&ordered),
            6
        );
    }
}
