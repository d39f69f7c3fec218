//! Cobble Core - options subsystem of the Cobble key-value storage engine
//!
//! Everything the engine needs to know about its tunables lives here:
//! - **Options model**: global tunables plus one `LevelOptions` per LSM level
//! - **Defaults**: fills unset fields, sizing levels geometrically
//! - **OPTIONS text**: deterministic serialization and a tolerant parser that
//!   also understands RocksDB's `OPTIONS` files
//! - **Check / Validate**: comparer and merger identity on reopen, and
//!   cross-field invariants before the store opens for writes
//!
//! # Example
//!
//! ```
//! use cobble_core::options::Options;
//!
//! let opts = Options::with_defaults();
//! let text = opts.to_string();
//!
//! let parsed: Options = text.parse().unwrap();
//! assert_eq!(parsed.to_string(), text);
//! opts.check(&text).unwrap();
//! opts.validate().unwrap();
//! ```

pub mod cache;
pub mod component;
pub mod options;

mod error;

pub use cache::Cache;
pub use error::{CobbleError, Result, Violation};
pub use options::{LevelOptions, Options, ParseHooks};

/// Cobble version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default option values
pub mod defaults {
    /// Number of levels in the LSM tree
    pub const NUM_LEVELS: usize = 7;

    /// Bytes written to a file before it is synced (512KB)
    pub const BYTES_PER_SYNC: u64 = 512 << 10;

    /// Block cache capacity (8MB)
    pub const CACHE_SIZE: u64 = 8 << 20;

    /// L0 files that trigger a compaction
    pub const L0_COMPACTION_THRESHOLD: u32 = 4;

    /// L0 files that stop writes
    pub const L0_STOP_WRITES_THRESHOLD: u32 = 12;

    /// Maximum size of the base level (64MB)
    pub const LBASE_MAX_BYTES: u64 = 64 << 20;

    pub const MAX_CONCURRENT_COMPACTIONS: u32 = 1;

    /// Manifest size before rotation (128MB)
    pub const MAX_MANIFEST_FILE_SIZE: u64 = 128 << 20;

    pub const MAX_OPEN_FILES: u32 = 1000;

    /// MemTable size (4MB)
    pub const MEM_TABLE_SIZE: u64 = 4 << 20;

    /// One memtable stays writable while another flushes
    pub const MEM_TABLE_STOP_WRITES_THRESHOLD: u32 = 2;

    /// Compaction rate floor in bytes/sec (4MB)
    pub const MIN_COMPACTION_RATE: u64 = 4 << 20;

    /// Flush rate floor in bytes/sec (1MB)
    pub const MIN_FLUSH_RATE: u64 = 1 << 20;

    pub const BLOCK_RESTART_INTERVAL: u32 = 16;

    /// SSTable block size (4KB)
    pub const BLOCK_SIZE: u32 = 4 * 1024;

    /// Target file size for L0 (2MB); level n uses `TARGET_FILE_SIZE << n`
    pub const TARGET_FILE_SIZE: u64 = 2 << 20;
}
