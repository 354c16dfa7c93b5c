use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::store::Storage;
use crate::txn::TransactionStack;
use crate::types::{Record, RecordId};

/// Tunables for a [`DB`]. Everything defaults to unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of live records. Inserting a new name past this fails
    /// with `ResourceExhausted`; overwriting an existing name never does.
    pub max_records: Option<usize>,
    /// Maximum transaction nesting depth.
    pub max_depth: Option<usize>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_records(mut self, limit: usize) -> Self {
        self.max_records = Some(limit);
        self
    }

    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

/// Point-in-time counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Live records.
    pub records: usize,
    /// Distinct values held by at least one live record.
    pub distinct_values: usize,
    /// Open transactions.
    pub depth: usize,
    /// Undo entries waiting in all open frames.
    pub pending_undo_entries: usize,
    /// Id the next new name will receive.
    pub next_id: RecordId,
}

/// The store. Owns the records, both indexes and the transaction stack.
///
/// Writes go straight to the live state; while a transaction is open each
/// write also leaves an undo entry in the innermost frame. Rollback replays
/// that frame backwards, commit throws every frame away.
///
/// Single-threaded: every call completes before the next. Share one `DB`
/// across threads only behind a single exclusive lock.
pub struct DB {
    storage: Storage,
    txns: TransactionStack,
    options: Options,
}

impl DB {
    /// Empty store with default (unlimited) options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        DB {
            storage: Storage::new(),
            txns: TransactionStack::new(),
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Set `name` to `value`, creating the record if needed.
    ///
    /// Only fails when `max_records` would be exceeded by a new name (or the
    /// id space runs out); the store is untouched in that case.
    pub fn set(&mut self, name: &str, value: &str) -> Result<RecordId> {
        if let Some(limit) = self.options.max_records {
            if self.storage.id_of(name).is_none() && self.storage.len() >= limit {
                warn!(target: "txkv::db", name, limit, "refusing insert: record limit reached");
                return Err(Error::ResourceExhausted {
                    resource: "records",
                    limit: limit as u64,
                });
            }
        }

        let (id, undo) = self.storage.set(name, value)?;
        if self.txns.record(undo) {
            trace!(target: "txkv::db", id, depth = self.txns.depth(), "logged set");
        }
        Ok(id)
    }

    /// Current value of `name`, or `None` if it has no live record.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.storage.get(name)
    }

    /// Delete `name`. Returns whether a record was removed; deleting a name
    /// that does not exist is a no-op, not an error.
    pub fn delete(&mut self, name: &str) -> bool {
        let Some(undo) = self.storage.delete(name) else {
            return false;
        };
        let id = undo.id();
        if self.txns.record(undo) {
            trace!(target: "txkv::db", id, depth = self.txns.depth(), "logged delete");
        }
        true
    }

    /// Number of live records whose value is exactly `value`.
    pub fn count(&self, value: &str) -> usize {
        self.storage.count(value)
    }

    /// Open a (possibly nested) transaction.
    pub fn begin(&mut self) -> Result<()> {
        if let Some(limit) = self.options.max_depth {
            if self.txns.depth() >= limit {
                warn!(target: "txkv::db", limit, "refusing begin: nesting limit reached");
                return Err(Error::ResourceExhausted {
                    resource: "transaction depth",
                    limit: limit as u64,
                });
            }
        }
        self.txns.begin();
        debug!(target: "txkv::db", depth = self.txns.depth(), "begin");
        Ok(())
    }

    /// Undo everything since the innermost BEGIN and close that transaction.
    /// Enclosing transactions stay open and keep their own entries.
    pub fn rollback(&mut self) -> Result<()> {
        let Some(frame) = self.txns.pop() else {
            warn!(target: "txkv::db", "rollback with no transaction active");
            return Err(Error::NoActiveTransaction);
        };
        let undone = frame.len();
        for entry in frame.into_undo_order() {
            self.storage.undo(entry);
        }
        debug!(target: "txkv::db", undone, depth = self.txns.depth(), "rollback");
        Ok(())
    }

    /// Make all pending work permanent and close every open transaction.
    /// Returns how many were closed; 0 means there was nothing to commit.
    pub fn commit(&mut self) -> usize {
        let pending = self.txns.pending_entries();
        let closed = self.txns.clear();
        if closed > 0 {
            debug!(target: "txkv::db", closed, pending, "commit");
        }
        closed
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.txns.depth()
    }

    pub fn in_transaction(&self) -> bool {
        self.txns.is_active()
    }

    pub fn id_of(&self, name: &str) -> Option<RecordId> {
        self.storage.id_of(name)
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Every live record, ordered by id.
    pub fn snapshot(&self) -> Vec<Record> {
        self.storage.snapshot()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            records: self.storage.len(),
            distinct_values: self.storage.distinct_values(),
            depth: self.txns.depth(),
            pending_undo_entries: self.txns.pending_entries(),
            next_id: self.storage.next_id(),
        }
    }

    /// Check that both indexes agree with the record store.
    pub fn verify_integrity(&self) -> Result<()> {
        self.storage.verify()
    }
}

impl Default for DB {
    fn default() -> Self {
        Self::new()
    }
}
