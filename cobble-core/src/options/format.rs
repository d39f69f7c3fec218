//! Canonical OPTIONS text

use super::keys::{LevelKey, OptionKey};
use super::{LevelOptions, Options, OPTIONS_FORMAT_VERSION};
use std::fmt;

impl Options {
    fn write_option(&self, f: &mut fmt::Formatter<'_>, key: OptionKey) -> fmt::Result {
        write!(f, "  {}=", key.as_str())?;
        self.write_value(f, key)?;
        writeln!(f)
    }

    fn write_value(&self, f: &mut fmt::Formatter<'_>, key: OptionKey) -> fmt::Result {
        match key {
            OptionKey::BytesPerSync => write!(f, "{}", self.bytes_per_sync),
            OptionKey::CacheSize => write!(f, "{}", self.cache_size),
            OptionKey::Cleaner => write_name(f, self.cleaner.as_ref().map(|c| c.name())),
            OptionKey::Comparer => write_name(f, self.comparer.as_ref().map(|c| c.name())),
            OptionKey::DisableWal => write!(f, "{}", self.disable_wal),
            OptionKey::L0CompactionThreshold => write!(f, "{}", self.l0_compaction_threshold),
            OptionKey::L0StopWritesThreshold => write!(f, "{}", self.l0_stop_writes_threshold),
            OptionKey::LBaseMaxBytes => write!(f, "{}", self.lbase_max_bytes),
            OptionKey::MaxConcurrentCompactions => {
                write!(f, "{}", self.max_concurrent_compactions)
            }
            OptionKey::MaxManifestFileSize => write!(f, "{}", self.max_manifest_file_size),
            OptionKey::MaxOpenFiles => write!(f, "{}", self.max_open_files),
            OptionKey::MemTableSize => write!(f, "{}", self.mem_table_size),
            OptionKey::MemTableStopWritesThreshold => {
                write!(f, "{}", self.mem_table_stop_writes_threshold)
            }
            OptionKey::MinCompactionRate => write!(f, "{}", self.min_compaction_rate),
            OptionKey::MinFlushRate => write!(f, "{}", self.min_flush_rate),
            OptionKey::Merger => write_name(f, self.merger.as_ref().map(|m| m.name())),
            OptionKey::TableFormat => write!(f, "{}", self.table_format),
            OptionKey::TablePropertyCollectors => {
                f.write_str("[")?;
                for (i, c) in self.table_property_collectors.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(c.name())?;
                }
                f.write_str("]")
            }
            OptionKey::WalDir => write!(f, "{}", self.wal_dir.display()),
        }
    }
}

impl LevelOptions {
    fn write_option(&self, f: &mut fmt::Formatter<'_>, key: LevelKey) -> fmt::Result {
        write!(f, "  {}=", key.as_str())?;
        self.write_value(f, key)?;
        writeln!(f)
    }

    fn write_value(&self, f: &mut fmt::Formatter<'_>, key: LevelKey) -> fmt::Result {
        match key {
            LevelKey::BlockRestartInterval => write!(f, "{}", self.block_restart_interval),
            LevelKey::BlockSize => write!(f, "{}", self.block_size),
            LevelKey::Compression => write!(f, "{}", self.compression),
            LevelKey::FilterPolicy => match &self.filter_policy {
                Some(p) => f.write_str(p.name()),
                None => f.write_str("none"),
            },
            LevelKey::FilterType => write!(f, "{}", self.filter_type),
            LevelKey::IndexBlockSize => write!(f, "{}", self.index_block_size),
            LevelKey::TargetFileSize => write!(f, "{}", self.target_file_size),
        }
    }
}

fn write_name(f: &mut fmt::Formatter<'_>, name: Option<&str>) -> fmt::Result {
    f.write_str(name.unwrap_or_default())
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Version]")?;
        writeln!(f, "  pebble_version={}", OPTIONS_FORMAT_VERSION)?;

        writeln!(f)?;
        writeln!(f, "[Options]")?;
        for key in OptionKey::WIRE_ORDER {
            self.write_option(f, key)?;
        }

        for (i, level) in self.levels.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "[Level \"{}\"]", i)?;
            for key in LevelKey::WIRE_ORDER {
                level.write_option(f, key)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRef;

    const DEFAULT_OPTIONS_HEAD: &str = r#"[Version]
  pebble_version=0.1

[Options]
  bytes_per_sync=524288
  cache_size=8388608
  cleaner=delete
  comparer=leveldb.BytewiseComparator
  disable_wal=false
  l0_compaction_threshold=4
  l0_stop_writes_threshold=12
  lbase_max_bytes=67108864
  max_concurrent_compactions=1
  max_manifest_file_size=134217728
  max_open_files=1000
  mem_table_size=4194304
  mem_table_stop_writes_threshold=2
  min_compaction_rate=4194304
  min_flush_rate=1048576
  merger=pebble.concatenate
  table_property_collectors=[]
  wal_dir=

[Level "0"]
  block_restart_interval=16
  block_size=4096
  compression=Snappy
  filter_policy=none
  filter_type=table
  index_block_size=4096
  target_file_size=2097152
"#;

    #[test]
    fn test_options_string() {
        let s = Options::with_defaults().to_string();
        assert!(
            s.starts_with(DEFAULT_OPTIONS_HEAD),
            "expected\n{}\nbut found\n{}",
            DEFAULT_OPTIONS_HEAD,
            s
        );

        let tail = &s[DEFAULT_OPTIONS_HEAD.len()..];
        assert!(tail.starts_with("\n[Level \"1\"]\n  block_restart_interval=16\n"));
        assert!(tail.ends_with("  target_file_size=134217728\n"));
        for level in 1..7 {
            assert!(tail.contains(&format!("[Level \"{}\"]", level)));
        }
        assert!(!s.contains("[Level \"7\"]"));
    }

    #[test]
    fn test_zero_value_rendering() {
        let s = Options::default().to_string();
        assert!(s.contains("  cleaner=\n"));
        assert!(s.contains("  disable_wal=false\n"));
        assert!(s.ends_with("  wal_dir=\n"));
        assert!(!s.contains("[Level"));
    }

    #[test]
    fn test_non_default_rendering() {
        let mut opts = Options {
            disable_wal: true,
            wal_dir: "wal".into(),
            table_property_collectors: vec![ComponentRef::named("a"), ComponentRef::named("b")],
            ..Default::default()
        };
        opts.ensure_defaults();
        opts.levels[2].filter_policy = Some(ComponentRef::named("rocksdb.BuiltinBloomFilter"));

        let s = opts.to_string();
        assert!(s.contains("  disable_wal=true\n"));
        assert!(s.contains("  table_property_collectors=[a,b]\n"));
        assert!(s.contains("  wal_dir=wal\n"));
        assert!(s.contains(
            "[Level \"2\"]\n  block_restart_interval=16\n  block_size=4096\n  compression=Snappy\n  filter_policy=rocksdb.BuiltinBloomFilter\n"
        ));
    }
}
