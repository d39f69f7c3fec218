//! Enumerated option values and their OPTIONS text forms

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Block compression algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Compression {
    /// Unset; resolves to `Snappy`
    #[default]
    Default,
    None,
    Snappy,
    Zstd,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Compression::Default => "Default",
            Compression::None => "NoCompression",
            Compression::Snappy => "Snappy",
            Compression::Zstd => "ZSTD",
        })
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Default" => Ok(Compression::Default),
            "NoCompression" => Ok(Compression::None),
            "Snappy" => Ok(Compression::Snappy),
            "ZSTD" => Ok(Compression::Zstd),
            _ => Err(format!("unknown compression: {:?}", s)),
        }
    }
}

/// Granularity of the key filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum FilterType {
    /// One filter block per table
    #[default]
    Table,
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterType::Table => f.write_str("table"),
        }
    }
}

impl FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(FilterType::Table),
            _ => Err(format!("unknown filter type: {:?}", s)),
        }
    }
}

/// On-disk table format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TableFormat {
    /// RocksDB block-based table, version 2
    #[default]
    RocksDBv2,
    /// LevelDB table; readable, but a store cannot be written in it
    LevelDB,
}

impl TableFormat {
    /// Check if a store can be opened for writes with this format
    pub fn is_writable(&self) -> bool {
        matches!(self, TableFormat::RocksDBv2)
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableFormat::RocksDBv2 => "rocksdbv2",
            TableFormat::LevelDB => "leveldb",
        })
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rocksdbv2" => Ok(TableFormat::RocksDBv2),
            "leveldb" => Ok(TableFormat::LevelDB),
            _ => Err(format!("unknown table format: {:?}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_text() {
        for c in [
            Compression::Default,
            Compression::None,
            Compression::Snappy,
            Compression::Zstd,
        ] {
            assert_eq!(c.to_string().parse::<Compression>(), Ok(c));
        }
        assert!("snappy".parse::<Compression>().is_err());
    }

    #[test]
    fn test_table_format() {
        assert_eq!("leveldb".parse::<TableFormat>(), Ok(TableFormat::LevelDB));
        assert!(TableFormat::default().is_writable());
        assert!(!TableFormat::LevelDB.is_writable());
        assert!("sstable".parse::<TableFormat>().is_err());
    }

    #[test]
    fn test_filter_type() {
        assert_eq!("table".parse::<FilterType>(), Ok(FilterType::Table));
        assert!("block".parse::<FilterType>().is_err());
    }
}
