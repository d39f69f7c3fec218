//! OPTIONS text parser
//!
//! Reads the canonical text written by `Display` as well as the
//! `[CFOptions "default"]` section of RocksDB `OPTIONS` files. Sections and keys
//! this build does not know are skipped so that files written by newer
//! builds, or by RocksDB, still open.

use super::keys::{LevelKey, OptionKey};
use super::{LevelOptions, Options, MAX_LEVEL_INDEX};
use crate::cache::Cache;
use crate::component::{
    Cleaner, ComponentRef, Comparer, FilterPolicy, Merger, Named, TablePropertyCollector,
};
use crate::{CobbleError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Merger value RocksDB writes when no merge operator is configured
pub(super) const UNSPECIFIED_MERGER: &str = "nullptr";

/// The only RocksDB column family read into `Options`
const ROCKSDB_DEFAULT_FAMILY: &str = "default";

/// Filter policy value for "no filter"
const NO_FILTER_POLICY: &str = "none";

/// Turns a component name from the OPTIONS text back into a component
pub type Hook<T> = Box<dyn Fn(&str) -> Result<Arc<T>> + Send + Sync>;

/// Resolution hooks used while parsing.
///
/// A missing hook is fine: the name is kept unresolved, which is all that
/// `Options::check` and serialization need.
#[derive(Default)]
pub struct ParseHooks {
    pub new_cleaner: Option<Hook<dyn Cleaner>>,
    pub new_comparer: Option<Hook<dyn Comparer>>,
    pub new_merger: Option<Hook<dyn Merger>>,
    pub new_filter_policy: Option<Hook<dyn FilterPolicy>>,
    pub new_table_property_collector: Option<Hook<dyn TablePropertyCollector>>,
}

impl ParseHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cleaner<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn Cleaner>> + Send + Sync + 'static,
    {
        self.new_cleaner = Some(Box::new(f));
        self
    }

    pub fn with_comparer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn Comparer>> + Send + Sync + 'static,
    {
        self.new_comparer = Some(Box::new(f));
        self
    }

    pub fn with_merger<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn Merger>> + Send + Sync + 'static,
    {
        self.new_merger = Some(Box::new(f));
        self
    }

    pub fn with_filter_policy<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn FilterPolicy>> + Send + Sync + 'static,
    {
        self.new_filter_policy = Some(Box::new(f));
        self
    }

    pub fn with_table_property_collector<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn TablePropertyCollector>> + Send + Sync + 'static,
    {
        self.new_table_property_collector = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for ParseHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseHooks")
            .field("new_cleaner", &self.new_cleaner.is_some())
            .field("new_comparer", &self.new_comparer.is_some())
            .field("new_merger", &self.new_merger.is_some())
            .field("new_filter_policy", &self.new_filter_policy.is_some())
            .field(
                "new_table_property_collector",
                &self.new_table_property_collector.is_some(),
            )
            .finish()
    }
}

/// Which key table applies to the current section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Section {
    Version,
    Options,
    /// RocksDB `[CFOptions "default"]`
    RocksDBOptions,
    Level(usize),
    Unknown,
}

impl Section {
    fn parse(header: &str) -> Result<Self> {
        if header == "Version" {
            return Ok(Section::Version);
        }
        if header == "Options" {
            return Ok(Section::Options);
        }
        if let Some(family) = header.strip_prefix("CFOptions ") {
            // Other column families carry their own comparator and merger.
            return Ok(match unquote(family.trim()) {
                ROCKSDB_DEFAULT_FAMILY => Section::RocksDBOptions,
                _ => Section::Unknown,
            });
        }
        if let Some(qualifier) = header.strip_prefix("Level ") {
            return parse_level_index(header, qualifier).map(Section::Level);
        }
        Ok(Section::Unknown)
    }

    /// Global option named by `key` in this section
    pub(super) fn option_key(self, key: &str) -> Option<OptionKey> {
        match self {
            Section::Options => OptionKey::native(key),
            Section::RocksDBOptions => OptionKey::legacy(key),
            Section::Version | Section::Level(_) | Section::Unknown => None,
        }
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|q| q.strip_suffix('"'))
        .unwrap_or(s)
}

fn parse_level_index(header: &str, qualifier: &str) -> Result<usize> {
    let invalid = |reason: String| CobbleError::InvalidSection {
        section: header.to_string(),
        reason,
    };

    let index: usize = unquote(qualifier.trim())
        .parse()
        .map_err(|e| invalid(format!("bad level index: {}", e)))?;
    if index > MAX_LEVEL_INDEX {
        return Err(invalid(format!(
            "level {} exceeds maximum level {}",
            index, MAX_LEVEL_INDEX
        )));
    }
    Ok(index)
}

/// One `key=value` line and the section it appeared in
pub(super) struct Entry<'a> {
    pub(super) section: &'a str,
    pub(super) key: &'a str,
    pub(super) value: &'a str,
}

impl Entry<'_> {
    fn parse_value<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.value.parse().map_err(|e: T::Err| CobbleError::InvalidValue {
            section: self.section.to_string(),
            key: self.key.to_string(),
            value: self.value.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Split `text` into entries, calling `f` for each one in order
pub(super) fn for_each_entry<F>(text: &str, mut f: F) -> Result<()>
where
    F: FnMut(Section, &Entry<'_>) -> Result<()>,
{
    let mut section = Section::Unknown;
    let mut header = "";

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            header = name;
            section = Section::parse(name)?;
            if section == Section::Unknown {
                debug!(section = name, "skipping unknown OPTIONS section");
            }
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| CobbleError::Syntax {
            line: line.to_string(),
        })?;
        let entry = Entry {
            section: header,
            key: key.trim(),
            value: value.trim(),
        };
        f(section, &entry)?;
    }

    Ok(())
}

fn resolve<T>(name: &str, hook: Option<&Hook<T>>) -> Result<Option<ComponentRef<T>>>
where
    T: ?Sized + Named,
{
    if name.is_empty() {
        return Ok(None);
    }
    match hook {
        Some(hook) => Ok(Some(ComponentRef::new(hook(name)?))),
        None => Ok(Some(ComponentRef::named(name))),
    }
}

fn skip_unknown_key(entry: &Entry<'_>) {
    debug!(
        section = entry.section,
        key = entry.key,
        "skipping unknown OPTIONS key"
    );
}

impl Options {
    /// Parse OPTIONS text into fresh options.
    ///
    /// Fields the text does not mention stay unset; run `ensure_defaults`
    /// before use. Component names are resolved through `hooks` when given.
    pub fn parse(text: &str, hooks: Option<&ParseHooks>) -> Result<Options> {
        let mut opts = Options::default();
        opts.apply_entries(text, hooks)?;
        Ok(opts)
    }

    /// Parse OPTIONS text on top of these options. Nothing changes unless
    /// the whole text parses.
    pub fn apply(&mut self, text: &str, hooks: Option<&ParseHooks>) -> Result<()> {
        let mut next = self.clone();
        next.apply_entries(text, hooks)?;
        *self = next;
        Ok(())
    }

    fn apply_entries(&mut self, text: &str, hooks: Option<&ParseHooks>) -> Result<()> {
        for_each_entry(text, |section, entry| {
            let key = match section {
                Section::Options | Section::RocksDBOptions => section.option_key(entry.key),
                Section::Level(index) => {
                    return match LevelKey::native(entry.key) {
                        Some(key) => {
                            if self.levels.len() <= index {
                                self.levels.resize_with(index + 1, LevelOptions::default);
                            }
                            self.levels[index].set_option(key, entry, hooks)
                        }
                        None => {
                            skip_unknown_key(entry);
                            Ok(())
                        }
                    };
                }
                Section::Version if entry.key == "pebble_version" => return Ok(()),
                Section::Version | Section::Unknown => None,
            };

            match key {
                Some(key) => self.set_option(key, entry, hooks),
                None => {
                    skip_unknown_key(entry);
                    Ok(())
                }
            }
        })
    }

    fn set_option(
        &mut self,
        key: OptionKey,
        entry: &Entry<'_>,
        hooks: Option<&ParseHooks>,
    ) -> Result<()> {
        match key {
            OptionKey::BytesPerSync => self.bytes_per_sync = entry.parse_value()?,
            OptionKey::CacheSize => {
                self.cache_size = entry.parse_value()?;
                // Keep an attached cache in agreement with the recorded size.
                if let Some(cache) = &self.cache {
                    if cache.capacity() != self.cache_size {
                        self.cache = Some(Cache::new(self.cache_size));
                    }
                }
            }
            OptionKey::Cleaner => {
                self.cleaner = resolve(entry.value, hooks.and_then(|h| h.new_cleaner.as_ref()))?
            }
            OptionKey::Comparer => {
                self.comparer =
                    resolve(entry.value, hooks.and_then(|h| h.new_comparer.as_ref()))?
            }
            OptionKey::DisableWal => self.disable_wal = entry.parse_value()?,
            OptionKey::L0CompactionThreshold => {
                self.l0_compaction_threshold = entry.parse_value()?
            }
            OptionKey::L0StopWritesThreshold => {
                self.l0_stop_writes_threshold = entry.parse_value()?
            }
            OptionKey::LBaseMaxBytes => self.lbase_max_bytes = entry.parse_value()?,
            OptionKey::MaxConcurrentCompactions => {
                self.max_concurrent_compactions = entry.parse_value()?
            }
            OptionKey::MaxManifestFileSize => self.max_manifest_file_size = entry.parse_value()?,
            OptionKey::MaxOpenFiles => self.max_open_files = entry.parse_value()?,
            OptionKey::MemTableSize => self.mem_table_size = entry.parse_value()?,
            OptionKey::MemTableStopWritesThreshold => {
                self.mem_table_stop_writes_threshold = entry.parse_value()?
            }
            OptionKey::MinCompactionRate => self.min_compaction_rate = entry.parse_value()?,
            OptionKey::MinFlushRate => self.min_flush_rate = entry.parse_value()?,
            OptionKey::Merger => {
                self.merger = if entry.value == UNSPECIFIED_MERGER {
                    None
                } else {
                    resolve(entry.value, hooks.and_then(|h| h.new_merger.as_ref()))?
                }
            }
            OptionKey::TableFormat => self.table_format = entry.parse_value()?,
            OptionKey::TablePropertyCollectors => {
                let names = entry
                    .value
                    .strip_prefix('[')
                    .and_then(|v| v.strip_suffix(']'))
                    .ok_or_else(|| CobbleError::InvalidValue {
                        section: entry.section.to_string(),
                        key: entry.key.to_string(),
                        value: entry.value.to_string(),
                        reason: "expected [name,...]".to_string(),
                    })?;
                let hook = hooks.and_then(|h| h.new_table_property_collector.as_ref());
                let mut collectors = Vec::new();
                for name in names.split(',') {
                    if let Some(c) = resolve(name.trim(), hook)? {
                        collectors.push(c);
                    }
                }
                self.table_property_collectors = collectors;
            }
            OptionKey::WalDir => self.wal_dir = PathBuf::from(entry.value),
        }
        Ok(())
    }
}

impl LevelOptions {
    fn set_option(
        &mut self,
        key: LevelKey,
        entry: &Entry<'_>,
        hooks: Option<&ParseHooks>,
    ) -> Result<()> {
        match key {
            LevelKey::BlockRestartInterval => self.block_restart_interval = entry.parse_value()?,
            LevelKey::BlockSize => self.block_size = entry.parse_value()?,
            LevelKey::Compression => self.compression = entry.parse_value()?,
            LevelKey::FilterPolicy => {
                self.filter_policy = if entry.value == NO_FILTER_POLICY {
                    None
                } else {
                    resolve(
                        entry.value,
                        hooks.and_then(|h| h.new_filter_policy.as_ref()),
                    )?
                }
            }
            LevelKey::FilterType => self.filter_type = entry.parse_value()?,
            LevelKey::IndexBlockSize => self.index_block_size = entry.parse_value()?,
            LevelKey::TargetFileSize => self.target_file_size = entry.parse_value()?,
        }
        Ok(())
    }
}

impl FromStr for Options {
    type Err = CobbleError;

    /// Parse without resolution hooks
    fn from_str(s: &str) -> Result<Self> {
        Options::parse(s, None)
    }
}
