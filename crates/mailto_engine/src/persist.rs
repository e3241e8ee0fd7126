use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::DomainEmail;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Creates `dir` if needed and checks that files can be created in it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |err: io::Error| PersistError::OutputDir(format!("{}: {err}", dir.display()));
    fs::create_dir_all(dir).map_err(unusable)?;
    NamedTempFile::new_in(dir).map_err(unusable)?;
    Ok(())
}

/// Writes run results into one directory, each file atomically
/// (temp file in the same directory, then rename).
pub struct ResultWriter {
    dir: PathBuf,
}

impl ResultWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// One address per line, sorted, with a trailing newline.
    pub fn write_emails(
        &self,
        filename: &str,
        emails: &BTreeSet<String>,
    ) -> Result<PathBuf, PersistError> {
        let content: String = emails.iter().map(|email| format!("{email}\n")).collect();
        self.write(filename, &content)
    }

    /// Pretty-printed JSON array of `{ "domain", "email" }` objects.
    pub fn write_records(
        &self,
        filename: &str,
        records: &[DomainEmail],
    ) -> Result<PathBuf, PersistError> {
        let content = serde_json::to_string_pretty(records)?;
        self.write(filename, &content)
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // `persist` cannot replace an existing file on every platform.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
