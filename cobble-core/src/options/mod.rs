//! Engine options
//!
//! `Options` holds the global tunables and one `LevelOptions` per level of
//! the LSM tree. Numeric fields use zero for "unset"; `ensure_defaults`
//! fills them in. The canonical OPTIONS text is produced by `Display` and
//! read back by `Options::parse`:
//!
//! ```text
//! [Version]
//!   pebble_version=0.1
//!
//! [Options]
//!   bytes_per_sync=524288
//!   ...
//!
//! [Level "0"]
//!   block_restart_interval=16
//!   ...
//! ```

mod check;
mod defaults;
mod format;
mod keys;
mod parser;
mod types;

pub use parser::{Hook, ParseHooks};
pub use types::{Compression, FilterType, TableFormat};

use crate::cache::Cache;
use crate::component::{
    Cleaner, ComponentRef, Comparer, FilterPolicy, Merger, TablePropertyCollector,
    DEFAULT_COMPARER_NAME, DEFAULT_MERGER_NAME,
};
use serde::Serialize;
use std::path::PathBuf;

/// Version written to the `[Version]` section
pub const OPTIONS_FORMAT_VERSION: &str = "0.1";

/// Highest level index accepted in a `[Level "<n>"]` header
pub const MAX_LEVEL_INDEX: usize = 63;

/// Per-level options
#[derive(Debug, Clone, Default, Serialize)]
pub struct LevelOptions {
    /// Keys between restart points in a data block
    pub block_restart_interval: u32,
    /// Target size of a data block in bytes
    pub block_size: u32,
    pub compression: Compression,
    /// Filter policy, `None` for no filter
    pub filter_policy: Option<ComponentRef<dyn FilterPolicy>>,
    pub filter_type: FilterType,
    /// Target size of an index block in bytes
    pub index_block_size: u32,
    /// Soft cap on the size of files written to this level by compactions
    pub target_file_size: u64,
}

/// Options for a store
#[derive(Debug, Clone, Default, Serialize)]
pub struct Options {
    /// Bytes written before a sync is issued in the background
    pub bytes_per_sync: u64,
    /// Block cache capacity in bytes
    pub cache_size: u64,
    /// Shared block cache; each `Options` holding it owns one reference
    #[serde(skip)]
    pub cache: Option<Cache>,
    pub cleaner: Option<ComponentRef<dyn Cleaner>>,
    pub comparer: Option<ComponentRef<dyn Comparer>>,
    pub disable_wal: bool,
    /// L0 file count that triggers a compaction
    pub l0_compaction_threshold: u32,
    /// L0 file count that stops writes
    pub l0_stop_writes_threshold: u32,
    /// Maximum bytes in the base level
    pub lbase_max_bytes: u64,
    pub levels: Vec<LevelOptions>,
    pub max_concurrent_compactions: u32,
    pub max_manifest_file_size: u64,
    pub max_open_files: u32,
    pub mem_table_size: u64,
    /// Queued memtables (including the mutable one) that stop writes
    pub mem_table_stop_writes_threshold: u32,
    pub merger: Option<ComponentRef<dyn Merger>>,
    /// Floor on compaction throughput in bytes/sec
    pub min_compaction_rate: u64,
    /// Floor on flush throughput in bytes/sec
    pub min_flush_rate: u64,
    pub table_format: TableFormat,
    pub table_property_collectors: Vec<ComponentRef<dyn TablePropertyCollector>>,
    /// Directory for WAL files; empty means the store directory
    pub wal_dir: PathBuf,
}

impl Options {
    /// Fully defaulted options
    pub fn with_defaults() -> Self {
        let mut opts = Options::default();
        opts.ensure_defaults();
        opts
    }

    /// Options for `level`.
    ///
    /// Levels past the configured ones repeat the last level with its target
    /// file size doubled per extra level.
    pub fn level(&self, level: usize) -> LevelOptions {
        if let Some(l) = self.levels.get(level) {
            return l.clone();
        }

        let mut l = match self.levels.last() {
            Some(last) => last.clone(),
            None => {
                let mut l0 = LevelOptions::default();
                l0.ensure_defaults(0);
                l0
            }
        };
        let extra = level - self.levels.len().saturating_sub(1);
        l.target_file_size = defaults::doubled(l.target_file_size, extra);
        l
    }

    /// Comparer name in effect
    pub fn comparer_name(&self) -> &str {
        self.comparer
            .as_ref()
            .map(|c| c.name())
            .unwrap_or(DEFAULT_COMPARER_NAME)
    }

    /// Merger name in effect
    pub fn merger_name(&self) -> &str {
        self.merger
            .as_ref()
            .map(|m| m.name())
            .unwrap_or(DEFAULT_MERGER_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::BytewiseComparer;
    use std::sync::Arc;

    #[test]
    fn test_level_options() {
        let opts = Options::with_defaults();
        let cases = [
            (0, 2 << 20),
            (1, (2 * 2) << 20),
            (2, (4 * 2) << 20),
            (3, (8 * 2) << 20),
            (4, (16 * 2) << 20),
            (5, (32 * 2) << 20),
            (6, (64 * 2) << 20),
        ];
        for (level, target_file_size) in cases {
            assert_eq!(
                opts.level(level).target_file_size,
                target_file_size,
                "level {}",
                level
            );
        }
    }

    #[test]
    fn test_level_past_configured() {
        let opts = Options::with_defaults();
        assert_eq!(opts.level(7).target_file_size, 256 << 20);
        assert_eq!(opts.level(8).target_file_size, 512 << 20);
        assert_eq!(opts.level(8).block_size, 4096);

        let empty = Options::default();
        assert_eq!(empty.level(0).target_file_size, 2 << 20);
        assert_eq!(empty.level(2).target_file_size, 8 << 20);
    }

    #[test]
    fn test_level_far_past_configured_saturates() {
        let opts = Options::with_defaults();
        assert_eq!(opts.level(64).target_file_size, u64::MAX);
        assert_eq!(opts.level(usize::MAX).target_file_size, u64::MAX);
        assert_eq!(Options::default().level(usize::MAX).target_file_size, u64::MAX);
    }

    #[test]
    fn test_effective_names() {
        let mut opts = Options::default();
        assert_eq!(opts.comparer_name(), "leveldb.BytewiseComparator");
        assert_eq!(opts.merger_name(), "pebble.concatenate");

        opts.comparer = Some(ComponentRef::named("custom"));
        assert_eq!(opts.comparer_name(), "custom");

        opts.comparer = Some(ComponentRef::new(Arc::new(BytewiseComparer) as Arc<dyn Comparer>));
        assert_eq!(opts.comparer_name(), "leveldb.BytewiseComparator");
    }

    #[test]
    fn test_json_snapshot() {
        let opts = Options::with_defaults();
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["comparer"], "leveldb.BytewiseComparator");
        assert_eq!(json["levels"].as_array().unwrap().len(), 7);
        assert_eq!(json["levels"][0]["compression"], "Snappy");
        assert!(json.get("cache").is_none());
    }
}
