//! Merge operators

use super::Named;

/// Name of the default merger
pub const DEFAULT_MERGER_NAME: &str = "pebble.concatenate";

/// Combines merge operands written to the same key
pub trait Merger: Named + Send + Sync {
    fn merge(&self, key: &[u8], existing: &[u8], operand: &[u8]) -> Vec<u8>;
}

/// Appends each operand to the existing value
#[derive(Debug, Default, Clone, Copy)]
pub struct ConcatenateMerger;

impl Named for ConcatenateMerger {
    fn name(&self) -> &str {
        DEFAULT_MERGER_NAME
    }
}

impl Merger for ConcatenateMerger {
    fn merge(&self, _key: &[u8], existing: &[u8], operand: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(existing.len() + operand.len());
        out.extend_from_slice(existing);
        out.extend_from_slice(operand);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenate() {
        let m = ConcatenateMerger;
        assert_eq!(m.merge(b"k", b"ab", b"cd"), b"abcd".to_vec());
        assert_eq!(m.merge(b"k", b"", b"x"), b"x".to_vec());
    }
}
