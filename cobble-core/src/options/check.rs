//! Reopen compatibility and invariant checks

use super::keys::OptionKey;
use super::parser::{for_each_entry, UNSPECIFIED_MERGER};
use super::Options;
use crate::{CobbleError, Result, Violation};

impl Options {
    /// Verify that OPTIONS text written by an earlier open of the store is
    /// compatible with these options.
    ///
    /// The comparer and merger are fixed for the life of a store: their names
    /// in `text` must match ours. The cleaner is not checked. A mismatch is
    /// never repaired here; the caller decides whether to refuse the open.
    ///
    /// Only the comparer and merger values are read, so values this build
    /// cannot interpret do not stop the check.
    pub fn check(&self, text: &str) -> Result<()> {
        let mut comparer: Option<String> = None;
        let mut merger: Option<String> = None;

        for_each_entry(text, |section, entry| {
            let value = Some(entry.value)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            match section.option_key(entry.key) {
                Some(OptionKey::Comparer) => comparer = value,
                Some(OptionKey::Merger) if entry.value == UNSPECIFIED_MERGER => merger = None,
                Some(OptionKey::Merger) => merger = value,
                _ => {}
            }
            Ok(())
        })?;

        if let Some(persisted) = comparer {
            if persisted != self.comparer_name() {
                return Err(CobbleError::IdentityMismatch {
                    component: "comparer",
                    persisted,
                    live: self.comparer_name().to_string(),
                });
            }
        }

        if let Some(persisted) = merger {
            if persisted != self.merger_name() {
                return Err(CobbleError::IdentityMismatch {
                    component: "merger",
                    persisted,
                    live: self.merger_name().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Check invariants between fields. Expects defaulted options; reports
    /// every broken invariant at once.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();

        if self.l0_stop_writes_threshold < self.l0_compaction_threshold {
            violations.push(Violation::L0StopWritesThreshold {
                stop: self.l0_stop_writes_threshold,
                compaction: self.l0_compaction_threshold,
            });
        }
        if self.mem_table_stop_writes_threshold < 2 {
            violations.push(Violation::MemTableStopWritesThreshold(
                self.mem_table_stop_writes_threshold,
            ));
        }
        if !self.table_format.is_writable() {
            violations.push(Violation::ReadOnlyTableFormat(self.table_format));
        }

        if self.levels.is_empty() {
            violations.push(Violation::NoLevels);
        }
        for (level, l) in self.levels.iter().enumerate() {
            if l.target_file_size == 0 {
                violations.push(Violation::ZeroTargetFileSize { level });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CobbleError::InvalidOptions(violations))
        }
    }
}
