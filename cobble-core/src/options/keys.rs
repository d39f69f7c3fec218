//! Key tables for the OPTIONS text
//!
//! Each (dialect, section) pair has its own lookup. A lookup that returns
//! `None` means the key is not ours and is skipped, which keeps files from
//! newer builds and from RocksDB readable.

/// Keys of the `[Options]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OptionKey {
    BytesPerSync,
    CacheSize,
    Cleaner,
    Comparer,
    DisableWal,
    L0CompactionThreshold,
    L0StopWritesThreshold,
    LBaseMaxBytes,
    MaxConcurrentCompactions,
    MaxManifestFileSize,
    MaxOpenFiles,
    MemTableSize,
    MemTableStopWritesThreshold,
    MinCompactionRate,
    MinFlushRate,
    Merger,
    TableFormat,
    TablePropertyCollectors,
    WalDir,
}

impl OptionKey {
    /// Emission order of the `[Options]` section. Readers diff files written
    /// by other builds, so this order never changes.
    pub(crate) const WIRE_ORDER: [OptionKey; 18] = [
        OptionKey::BytesPerSync,
        OptionKey::CacheSize,
        OptionKey::Cleaner,
        OptionKey::Comparer,
        OptionKey::DisableWal,
        OptionKey::L0CompactionThreshold,
        OptionKey::L0StopWritesThreshold,
        OptionKey::LBaseMaxBytes,
        OptionKey::MaxConcurrentCompactions,
        OptionKey::MaxManifestFileSize,
        OptionKey::MaxOpenFiles,
        OptionKey::MemTableSize,
        OptionKey::MemTableStopWritesThreshold,
        OptionKey::MinCompactionRate,
        OptionKey::MinFlushRate,
        OptionKey::Merger,
        OptionKey::TablePropertyCollectors,
        OptionKey::WalDir,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            OptionKey::BytesPerSync => "bytes_per_sync",
            OptionKey::CacheSize => "cache_size",
            OptionKey::Cleaner => "cleaner",
            OptionKey::Comparer => "comparer",
            OptionKey::DisableWal => "disable_wal",
            OptionKey::L0CompactionThreshold => "l0_compaction_threshold",
            OptionKey::L0StopWritesThreshold => "l0_stop_writes_threshold",
            OptionKey::LBaseMaxBytes => "lbase_max_bytes",
            OptionKey::MaxConcurrentCompactions => "max_concurrent_compactions",
            OptionKey::MaxManifestFileSize => "max_manifest_file_size",
            OptionKey::MaxOpenFiles => "max_open_files",
            OptionKey::MemTableSize => "mem_table_size",
            OptionKey::MemTableStopWritesThreshold => "mem_table_stop_writes_threshold",
            OptionKey::MinCompactionRate => "min_compaction_rate",
            OptionKey::MinFlushRate => "min_flush_rate",
            OptionKey::Merger => "merger",
            OptionKey::TableFormat => "table_format",
            OptionKey::TablePropertyCollectors => "table_property_collectors",
            OptionKey::WalDir => "wal_dir",
        }
    }

    /// Native `[Options]` key
    pub(crate) fn native(key: &str) -> Option<Self> {
        Self::WIRE_ORDER
            .iter()
            .chain(std::iter::once(&OptionKey::TableFormat))
            .copied()
            .find(|k| k.as_str() == key)
    }

    /// RocksDB `[CFOptions "default"]` key
    pub(crate) fn legacy(key: &str) -> Option<Self> {
        match key {
            "comparator" => Some(OptionKey::Comparer),
            "merge_operator" => Some(OptionKey::Merger),
            "write_buffer_size" => Some(OptionKey::MemTableSize),
            "level0_file_num_compaction_trigger" => Some(OptionKey::L0CompactionThreshold),
            "level0_stop_writes_trigger" => Some(OptionKey::L0StopWritesThreshold),
            "max_bytes_for_level_base" => Some(OptionKey::LBaseMaxBytes),
            "max_write_buffer_number" => Some(OptionKey::MemTableStopWritesThreshold),
            _ => None,
        }
    }
}

/// Keys of a `[Level "<n>"]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LevelKey {
    BlockRestartInterval,
    BlockSize,
    Compression,
    FilterPolicy,
    FilterType,
    IndexBlockSize,
    TargetFileSize,
}

impl LevelKey {
    pub(crate) const WIRE_ORDER: [LevelKey; 7] = [
        LevelKey::BlockRestartInterval,
        LevelKey::BlockSize,
        LevelKey::Compression,
        LevelKey::FilterPolicy,
        LevelKey::FilterType,
        LevelKey::IndexBlockSize,
        LevelKey::TargetFileSize,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            LevelKey::BlockRestartInterval => "block_restart_interval",
            LevelKey::BlockSize => "block_size",
            LevelKey::Compression => "compression",
            LevelKey::FilterPolicy => "filter_policy",
            LevelKey::FilterType => "filter_type",
            LevelKey::IndexBlockSize => "index_block_size",
            LevelKey::TargetFileSize => "target_file_size",
        }
    }

    pub(crate) fn native(key: &str) -> Option<Self> {
        Self::WIRE_ORDER.iter().copied().find(|k| k.as_str() == key)
    }
}
