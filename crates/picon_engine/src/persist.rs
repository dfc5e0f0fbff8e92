use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("not a file path: {0:?}")]
    InvalidTarget(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Writes files under `dir` through a temp file that is renamed into place.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writer for the directory holding `target`.
    pub fn for_target(target: &Path) -> Result<(Self, String), PersistError> {
        let filename = target
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PersistError::InvalidTarget(target.to_path_buf()))?;
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((Self::new(dir), filename.to_string()))
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        let mut file = self.begin(filename)?;
        file.write_chunk(content)?;
        file.commit()
    }

    /// Start a file that only becomes visible under `filename` on [`PartialFile::commit`].
    pub fn begin(&self, filename: &str) -> Result<PartialFile, PersistError> {
        ensure_output_dir(&self.dir)?;
        let tmp = NamedTempFile::new_in(&self.dir)?;
        Ok(PartialFile {
            tmp,
            target: self.dir.join(filename),
            written: 0,
        })
    }
}

/// A file being written; dropped without commit, it leaves nothing behind.
pub struct PartialFile {
    tmp: NamedTempFile,
    target: PathBuf,
    written: u64,
}

impl PartialFile {
    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), PersistError> {
        self.tmp.write_all(chunk)?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn commit(mut self) -> Result<PathBuf, PersistError> {
        self.tmp.flush()?;
        self.tmp.as_file_mut().sync_all()?;

        // Replace existing file if present.
        if self.target.exists() {
            fs::remove_file(&self.target)?;
        }
        self.tmp
            .persist(&self.target)
            .map_err(|e| PersistError::Io(e.error))?;
        Ok(self.target)
    }
}
