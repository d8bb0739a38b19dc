//! In-process versioned blob
//!
//! Behaves like the remote content API: every accepted write bumps the
//! revision, and a write guarded by a stale revision is rejected. Write
//! failures and lost acknowledgements can be injected to exercise the retry
//! path.

use parking_lot::Mutex;
use rollcall_core::{Blob, BlobBackend, StoreError, StoreResult, VersionToken};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
struct BlobState {
    content: Vec<u8>,
    revision: u64,
    messages: Vec<String>,
}

#[derive(Debug, Default)]
struct Faults {
    fail_next: u32,
    fail_all: bool,
    drop_acks: u32,
}

/// Versioned blob held in memory
#[derive(Debug)]
pub struct MemoryBlob {
    state: Mutex<BlobState>,
    faults: Mutex<Faults>,
    fetches: AtomicU64,
    put_attempts: AtomicU64,
}

impl MemoryBlob {
    /// Blob seeded with `content` at revision 1
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        MemoryBlob {
            state: Mutex::new(BlobState {
                content: content.into(),
                revision: 1,
                messages: Vec::new(),
            }),
            faults: Mutex::new(Faults::default()),
            fetches: AtomicU64::new(0),
            put_attempts: AtomicU64::new(0),
        }
    }

    fn token(revision: u64) -> VersionToken {
        VersionToken::new(format!("rev-{}", revision))
    }

    /// Current content, bypassing counters and faults
    pub fn content(&self) -> Vec<u8> {
        self.state.lock().content.clone()
    }

    /// Current content as text (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.state.lock().content).into_owned()
    }

    /// Current revision token
    pub fn current_version(&self) -> VersionToken {
        Self::token(self.state.lock().revision)
    }

    /// Messages of accepted writes, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.state.lock().messages.clone()
    }

    /// Number of `fetch`/`version` calls served
    pub fn fetches(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Number of `put` calls received, failed or not
    pub fn put_attempts(&self) -> u64 {
        self.put_attempts.load(Ordering::SeqCst)
    }

    /// Reject the next `n` writes with a transport error
    pub fn fail_next_puts(&self, n: u32) {
        self.faults.lock().fail_next = n;
    }

    /// Reject every write until switched off
    pub fn fail_all_puts(&self, on: bool) {
        self.faults.lock().fail_all = on;
    }

    /// Accept the next `n` writes but report each as a transport error,
    /// as when the response is lost after the remote committed
    pub fn drop_next_acks(&self, n: u32) {
        self.faults.lock().drop_acks = n;
    }

    fn dropped_ack(&self) -> bool {
        let mut faults = self.faults.lock();
        if faults.drop_acks > 0 {
            faults.drop_acks -= 1;
            return true;
        }
        false
    }

    fn injected_fault(&self) -> bool {
        let mut faults = self.faults.lock();
        if faults.fail_all {
            return true;
        }
        if faults.fail_next > 0 {
            faults.fail_next -= 1;
            return true;
        }
        false
    }
}

impl BlobBackend for MemoryBlob {
    fn fetch(&self) -> StoreResult<Blob> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        Ok(Blob {
            content: state.content.clone(),
            version: Self::token(state.revision),
        })
    }

    fn version(&self) -> StoreResult<VersionToken> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Self::token(self.state.lock().revision))
    }

    fn put(
        &self,
        content: &[u8],
        message: &str,
        expected: &VersionToken,
    ) -> StoreResult<VersionToken> {
        self.put_attempts.fetch_add(1, Ordering::SeqCst);
        if self.injected_fault() {
            return Err(StoreError::Transport("injected write failure".into()));
        }
        let mut state = self.state.lock();
        if Self::token(state.revision) != *expected {
            return Err(StoreError::Conflict {
                expected: expected.clone(),
            });
        }
        state.content = content.to_vec();
        state.revision += 1;
        state.messages.push(message.to_string());
        if self.dropped_ack() {
            return Err(StoreError::Transport("response lost after write".into()));
        }
        Ok(Self::token(state.revision))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
