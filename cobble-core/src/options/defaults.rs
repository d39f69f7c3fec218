//! Default resolution

use super::{Compression, LevelOptions, Options};
use crate::cache::Cache;
use crate::component::{
    BytewiseComparer, Cleaner, ComponentRef, Comparer, ConcatenateMerger, DeleteCleaner, Merger,
};
use crate::defaults;
use std::sync::Arc;
use tracing::trace;

fn set_default<T: Default + PartialEq>(field: &mut T, value: T) {
    if *field == T::default() {
        *field = value;
    }
}

impl Options {
    /// Fill every unset field with its default. Fields already set are left
    /// alone, so calling this again changes nothing.
    ///
    /// Acquires a block cache of `cache_size` bytes when none is attached;
    /// the options then hold one reference to it.
    pub fn ensure_defaults(&mut self) -> &mut Self {
        set_default(&mut self.bytes_per_sync, defaults::BYTES_PER_SYNC);
        match self.cache.as_ref().map(Cache::capacity) {
            Some(capacity) => set_default(&mut self.cache_size, capacity),
            None => {
                set_default(&mut self.cache_size, defaults::CACHE_SIZE);
                trace!(capacity = self.cache_size, "acquiring default block cache");
                self.cache = Some(Cache::new(self.cache_size));
            }
        }

        if self.cleaner.is_none() {
            let cleaner: Arc<dyn Cleaner> = Arc::new(DeleteCleaner);
            self.cleaner = Some(ComponentRef::new(cleaner));
        }
        if self.comparer.is_none() {
            let comparer: Arc<dyn Comparer> = Arc::new(BytewiseComparer);
            self.comparer = Some(ComponentRef::new(comparer));
        }
        if self.merger.is_none() {
            let merger: Arc<dyn Merger> = Arc::new(ConcatenateMerger);
            self.merger = Some(ComponentRef::new(merger));
        }

        set_default(
            &mut self.l0_compaction_threshold,
            defaults::L0_COMPACTION_THRESHOLD,
        );
        set_default(
            &mut self.l0_stop_writes_threshold,
            defaults::L0_STOP_WRITES_THRESHOLD,
        );
        set_default(&mut self.lbase_max_bytes, defaults::LBASE_MAX_BYTES);
        set_default(
            &mut self.max_concurrent_compactions,
            defaults::MAX_CONCURRENT_COMPACTIONS,
        );
        set_default(
            &mut self.max_manifest_file_size,
            defaults::MAX_MANIFEST_FILE_SIZE,
        );
        set_default(&mut self.max_open_files, defaults::MAX_OPEN_FILES);
        set_default(&mut self.mem_table_size, defaults::MEM_TABLE_SIZE);
        set_default(
            &mut self.mem_table_stop_writes_threshold,
            defaults::MEM_TABLE_STOP_WRITES_THRESHOLD,
        );
        set_default(&mut self.min_compaction_rate, defaults::MIN_COMPACTION_RATE);
        set_default(&mut self.min_flush_rate, defaults::MIN_FLUSH_RATE);

        if self.levels.len() < defaults::NUM_LEVELS {
            self.levels
                .resize_with(defaults::NUM_LEVELS, LevelOptions::default);
        }
        for (level, l) in self.levels.iter_mut().enumerate() {
            l.ensure_defaults(level);
        }

        self
    }
}

impl LevelOptions {
    /// Fill unset fields of the options for `level`
    pub(crate) fn ensure_defaults(&mut self, level: usize) {
        set_default(
            &mut self.block_restart_interval,
            defaults::BLOCK_RESTART_INTERVAL,
        );
        set_default(&mut self.block_size, defaults::BLOCK_SIZE);
        set_default(&mut self.compression, Compression::Snappy);
        set_default(&mut self.index_block_size, self.block_size);

        // Each level holds roughly twice the data of the one above it.
        set_default(
            &mut self.target_file_size,
            doubled(defaults::TARGET_FILE_SIZE, level),
        );
    }
}

/// `size` doubled `times` times, saturating at `u64::MAX`
pub(super) fn doubled(size: u64, times: usize) -> u64 {
    let shift = u32::try_from(times).unwrap_or(u32::MAX);
    size.checked_shl(shift)
        .filter(|t| t >> shift == size)
        .unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRef;

    #[test]
    fn test_global_defaults() {
        let opts = Options::with_defaults();

        assert_eq!(opts.bytes_per_sync, 512 << 10);
        assert_eq!(opts.cache_size, 8 << 20);
        assert_eq!(opts.l0_compaction_threshold, 4);
        assert_eq!(opts.l0_stop_writes_threshold, 12);
        assert_eq!(opts.mem_table_stop_writes_threshold, 2);
        assert_eq!(opts.cleaner.as_ref().unwrap().name(), "delete");
        assert_eq!(opts.comparer_name(), "leveldb.BytewiseComparator");
        assert_eq!(opts.merger_name(), "pebble.concatenate");
        assert!(opts.comparer.as_ref().unwrap().is_resolved());
        assert!(!opts.disable_wal);
        assert_eq!(opts.levels.len(), 7);
    }

    #[test]
    fn test_caller_values_preserved() {
        let mut opts = Options {
            l0_compaction_threshold: 8,
            comparer: Some(ComponentRef::named("custom")),
            levels: vec![LevelOptions::default(); 3],
            ..Default::default()
        };
        opts.levels[0].block_size = 1024;
        opts.levels[2].target_file_size = 1000;
        opts.levels[1].compression = Compression::None;
        opts.ensure_defaults();

        assert_eq!(opts.l0_compaction_threshold, 8);
        assert_eq!(opts.comparer_name(), "custom");
        assert_eq!(opts.levels.len(), 7);
        assert_eq!(opts.levels[0].block_size, 1024);
        assert_eq!(opts.levels[0].index_block_size, 1024);
        assert_eq!(opts.levels[1].block_size, 4096);
        assert_eq!(opts.levels[1].compression, Compression::None);
        assert_eq!(opts.levels[2].target_file_size, 1000);
        // Defaults do not chain off an explicit neighbour.
        assert_eq!(opts.levels[3].target_file_size, 16 << 20);
    }

    #[test]
    fn test_geometric_target_file_size() {
        let opts = Options::with_defaults();
        let sizes: Vec<u64> = opts.levels.iter().map(|l| l.target_file_size).collect();
        assert_eq!(
            sizes,
            vec![
                2097152, 4194304, 8388608, 16777216, 33554432, 67108864, 134217728
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let mut opts = Options::with_defaults();
        let before = opts.to_string();
        let cache = opts.cache.clone().unwrap();

        opts.ensure_defaults();
        assert_eq!(opts.to_string(), before);
        assert!(opts.cache.as_ref().unwrap().ptr_eq(&cache));
    }

    #[test]
    fn test_default_cache_acquired_once() {
        let opts = Options::with_defaults();
        let cache = opts.cache.as_ref().unwrap();
        assert_eq!(cache.capacity(), 8 << 20);
        assert_eq!(cache.ref_count(), 1);

        let copy = opts.clone();
        assert_eq!(cache.ref_count(), 2);
        drop(copy);
        assert_eq!(cache.ref_count(), 1);
    }

    #[test]
    fn test_attached_cache_kept() {
        let cache = Cache::new(1 << 30);
        let mut opts = Options {
            cache: Some(cache.clone()),
            ..Default::default()
        };
        opts.ensure_defaults();

        assert_eq!(opts.cache_size, 1 << 30);
        assert!(opts.cache.as_ref().unwrap().ptr_eq(&cache));
        assert_eq!(cache.ref_count(), 2);
    }

    #[test]
    fn test_doubled() {
        assert_eq!(doubled(2 << 20, 0), 2 << 20);
        assert_eq!(doubled(2 << 20, 3), 16 << 20);
        assert_eq!(doubled(1, 63), 1 << 63);
        assert_eq!(doubled(2, 63), u64::MAX);
        assert_eq!(doubled(1, usize::MAX), u64::MAX);
        assert_eq!(doubled(0, 10), 0);
    }

    #[test]
    fn test_huge_level_saturates() {
        let mut l = LevelOptions::default();
        l.ensure_defaults(100);
        assert_eq!(l.target_file_size, u64::MAX);
    }
}
