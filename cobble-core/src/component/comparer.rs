//! Key ordering

use super::Named;
use std::cmp::Ordering;

/// Name of the default comparer
pub const DEFAULT_COMPARER_NAME: &str = "leveldb.BytewiseComparator";

/// Defines the order of user keys.
///
/// The order is baked into every persisted table, so a store must always be
/// reopened with a comparer of the same name.
pub trait Comparer: Named + Send + Sync {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

/// Lexicographic byte order
#[derive(Debug, Default, Clone, Copy)]
pub struct BytewiseComparer;

impl Named for BytewiseComparer {
    fn name(&self) -> &str {
        DEFAULT_COMPARER_NAME
    }
}

impl Comparer for BytewiseComparer {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytewise_order() {
        let c = BytewiseComparer;
        assert_eq!(c.compare(b"a", b"b"), Ordering::Less);
        assert_eq!(c.compare(b"ab", b"a"), Ordering::Greater);
        assert_eq!(c.compare(b"", b""), Ordering::Equal);
    }
}
