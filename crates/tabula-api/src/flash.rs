//! One-time flash tokens.
//!
//! After a successful submission the stored record is parked under a random
//! token that travels in the redirect URL. The latest-entry view takes it
//! out exactly once; a second read, an unknown token, or an expired token
//! all find nothing.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tabula_core::Record;
use uuid::Uuid;

struct Entry {
    record: Record,
    created: Instant,
}

/// In-memory map of pending one-time records.
pub struct FlashStore {
    ttl: Duration,
    entries: Mutex<HashMap<Uuid, Entry>>,
}

impl FlashStore {
    /// Create an empty store whose tokens expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Park a record and return its token. Expired entries are pruned.
    pub fn put(&self, record: Record) -> Uuid {
        let token = Uuid::new_v4();
        let mut entries = self.lock();
        let ttl = self.ttl;
        entries.retain(|_, e| e.created.elapsed() < ttl);
        entries.insert(
            token,
            Entry {
                record,
                created: Instant::now(),
            },
        );
        token
    }

    /// Remove and return the record for `token` if it has not expired.
    pub fn take(&self, token: &Uuid) -> Option<Record> {
        let entry = self.lock().remove(token)?;
        if entry.created.elapsed() < self.ttl {
            Some(entry.record)
        } else {
            tracing::debug!(%token, "flash token expired");
            None
        }
    }

    /// Number of pending tokens, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no tokens are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for FlashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashStore")
            .field("ttl", &self.ttl)
            .field("pending", &self.len())
            .finish()
    }
}
