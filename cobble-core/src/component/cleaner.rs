//! Obsolete file cleaners

use super::Named;
use crate::Result;
use std::fs;
use std::io;
use std::path::Path;

/// Name of the default cleaner
pub const DEFAULT_CLEANER_NAME: &str = "delete";

/// Disposes of files the store no longer references
pub trait Cleaner: Named + Send + Sync {
    fn clean(&self, path: &Path) -> Result<()>;
}

/// Removes obsolete files
#[derive(Debug, Default, Clone, Copy)]
pub struct DeleteCleaner;

impl Named for DeleteCleaner {
    fn name(&self) -> &str {
        DEFAULT_CLEANER_NAME
    }
}

impl Cleaner for DeleteCleaner {
    fn clean(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }
}

/// Moves obsolete files into an `archive` directory next to them
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveCleaner;

impl ArchiveCleaner {
    pub const NAME: &'static str = "archive";
}

impl Named for ArchiveCleaner {
    fn name(&self) -> &str {
        Self::NAME
    }
}

impl Cleaner for ArchiveCleaner {
    fn clean(&self, path: &Path) -> Result<()> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no file name in {}", path.display()),
            )
        })?;
        let archive_dir = path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("archive");

        fs::create_dir_all(&archive_dir)?;
        fs::rename(path, archive_dir.join(file_name))?;
        Ok(())
    }
}
