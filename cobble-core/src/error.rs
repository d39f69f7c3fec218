//! Error types for Cobble

use crate::options::TableFormat;
use thiserror::Error;

/// Result type alias for Cobble operations
pub type Result<T> = std::result::Result<T, CobbleError>;

/// Cobble error types
#[derive(Error, Debug)]
pub enum CobbleError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Line is neither a section header nor `key=value`
    #[error("invalid key=value syntax: {line}")]
    Syntax { line: String },

    /// Section header that cannot be interpreted
    #[error("invalid section [{section}]: {reason}")]
    InvalidSection { section: String, reason: String },

    /// Value that does not parse for its key
    #[error("invalid value for {section}.{key}: {value:?} ({reason})")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// A parse hook does not know the named component
    #[error("unknown {kind}: {name:?}")]
    UnknownComponent { kind: &'static str, name: String },

    /// Comparer or merger differs between the OPTIONS text and the live options
    #[error("{component} name from file {persisted:?} != {component} name from options {live:?}")]
    IdentityMismatch {
        component: &'static str,
        persisted: String,
        live: String,
    },

    /// One or more option invariants are broken
    #[error("invalid options: {}", join_violations(.0))]
    InvalidOptions(Vec<Violation>),
}

impl CobbleError {
    /// Check if error comes from malformed OPTIONS text
    pub fn is_syntax(&self) -> bool {
        matches!(self, CobbleError::Syntax { .. })
    }

    /// Check if error means the store was created with a different comparer or merger
    pub fn is_identity_mismatch(&self) -> bool {
        matches!(self, CobbleError::IdentityMismatch { .. })
    }

    /// Broken invariants, if this is a validation error
    pub fn violations(&self) -> &[Violation] {
        match self {
            CobbleError::InvalidOptions(v) => v,
            _ => &[],
        }
    }
}

/// A single broken option invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("L0StopWritesThreshold ({stop}) must be >= L0CompactionThreshold ({compaction})")]
    L0StopWritesThreshold { stop: u32, compaction: u32 },

    #[error("MemTableStopWritesThreshold ({0}) must be >= 2")]
    MemTableStopWritesThreshold(u32),

    #[error("table format {0} not supported for a writable store")]
    ReadOnlyTableFormat(TableFormat),

    #[error("no levels configured")]
    NoLevels,

    #[error("Level {level} TargetFileSize must be > 0")]
    ZeroTargetFileSize { level: usize },
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
