//! Local file backend
//!
//! Keeps the table in a file on disk. The version token is the SHA-256 of the
//! file content, so any change made by another process, including a manual
//! edit, invalidates a previously fetched token.
//!
//! A conditional write holds `<file>.lock`, created exclusively, across the
//! read, the comparison and the replace, so every [`FileBlob`] on the same
//! path, in this process or another, sees the same sequence of versions. The
//! new content goes to a uniquely named temporary file in the same directory
//! that is then renamed over the original.

use rollcall_core::{Blob, BlobBackend, StoreError, StoreResult, VersionToken};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::warn;

/// How long a writer waits for another writer's lock
const LOCK_WAIT: Duration = Duration::from_secs(5);
const LOCK_POLL: Duration = Duration::from_millis(5);

/// Table file on the local filesystem
#[derive(Debug)]
pub struct FileBlob {
    path: PathBuf,
    lock_path: PathBuf,
}

/// Held while a write is in progress; removes the lock file on drop
struct WriteLockGuard {
    lock_path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

impl FileBlob {
    /// Backend over the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");
        FileBlob {
            path,
            lock_path: PathBuf::from(lock_path),
        }
    }

    /// Path of the table file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn digest(content: &[u8]) -> VersionToken {
        let hash = Sha256::digest(content);
        let mut hex = String::with_capacity(hash.len() * 2);
        for byte in hash {
            let _ = write!(hex, "{:02x}", byte);
        }
        VersionToken::new(hex)
    }

    fn transport(&self, e: impl std::fmt::Display) -> StoreError {
        StoreError::Transport(format!("{}: {}", self.path.display(), e))
    }

    fn read(&self) -> StoreResult<Vec<u8>> {
        fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::Missing(self.path.display().to_string()),
            _ => self.transport(e),
        })
    }

    fn lock(&self) -> StoreResult<WriteLockGuard> {
        let deadline = Instant::now() + LOCK_WAIT;
        loop {
            match OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&self.lock_path)
            {
                Ok(_) => {
                    return Ok(WriteLockGuard {
                        lock_path: self.lock_path.clone(),
                    })
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    if Instant::now() >= deadline {
                        warn!(lock = %self.lock_path.display(), "table lock still held");
                        return Err(self.transport(format!(
                            "failed to acquire lock {}",
                            self.lock_path.display()
                        )));
                    }
                    thread::sleep(LOCK_POLL);
                }
                Err(e) => return Err(self.transport(format!("failed to acquire lock: {}", e))),
            }
        }
    }

    fn replace(&self, content: &[u8]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl BlobBackend for FileBlob {
    fn fetch(&self) -> StoreResult<Blob> {
        let content = self.read()?;
        let version = Self::digest(&content);
        Ok(Blob { content, version })
    }

    fn put(
        &self,
        content: &[u8],
        _message: &str,
        expected: &VersionToken,
    ) -> StoreResult<VersionToken> {
        let _guard = self.lock()?;
        let current = Self::digest(&self.read()?);
        if current != *expected {
            return Err(StoreError::Conflict {
                expected: expected.clone(),
            });
        }
        self.replace(content).map_err(|e| self.transport(e))?;
        Ok(Self::digest(content))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
