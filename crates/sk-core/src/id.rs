use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for item IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for drawing items.
/// Internally a `Spur` index: 4 bytes, Copy, O(1) Eq and Hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Spur);

impl ItemId {
    /// Intern a string as an ItemId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ItemId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a unique ID with a kind prefix (e.g. `text_0`, `square_1`).
    pub fn with_prefix(prefix: &str) -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let a = ItemId::intern("square_7");
        let b = ItemId::intern("square_7");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "square_7");
    }

    #[test]
    fn prefixed_ids_are_unique() {
        let a = ItemId::with_prefix("text");
        let b = ItemId::with_prefix("text");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("text_"));
    }
}
