//! Change notification: a single monotonically increasing version.
//!
//! Every mutating model operation bumps the version. Consumers keep the
//! last value they acted on and compare; equality means nothing changed.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChangeVersion(u64);

impl ChangeVersion {
    pub const INITIAL: Self = Self(0);

    /// Advance to the next version.
    pub fn bump(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Display for ChangeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Anything whose changes are tracked by a [`ChangeVersion`].
pub trait Versioned {
    fn version(&self) -> ChangeVersion;

    /// Whether anything changed since `seen` was observed.
    fn changed_since(&self, seen: ChangeVersion) -> bool {
        self.version() != seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_is_monotonic() {
        let mut v = ChangeVersion::INITIAL;
        let before = v;
        v.bump();
        v.bump();
        assert!(v > before);
        assert_eq!(v.to_string(), "v2");
    }
}
