//! Table filter policies

use super::Named;

/// Builds and probes the per-table key filter
pub trait FilterPolicy: Named + Send + Sync {}

/// Bloom filter compatible with RocksDB's built-in filter
#[derive(Debug, Clone, Copy)]
pub struct BloomFilterPolicy {
    pub bits_per_key: usize,
}

impl BloomFilterPolicy {
    pub const NAME: &'static str = "rocksdb.BuiltinBloomFilter";

    pub fn new(bits_per_key: usize) -> Self {
        Self { bits_per_key }
    }
}

impl Default for BloomFilterPolicy {
    fn default() -> Self {
        Self { bits_per_key: 10 }
    }
}

impl Named for BloomFilterPolicy {
    fn name(&self) -> &str {
        Self::NAME
    }
}

impl FilterPolicy for BloomFilterPolicy {}
