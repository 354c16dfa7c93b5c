use crate::error::{Error, Result};
use crate::index::{FastMap, fast_map};
use crate::types::{Record, RecordId};

/// Hands out record ids: 1, 2, 3, ...
///
/// Increment-only. Rolling back an insert does NOT give its id back, so an
/// id still referenced by an undo entry in an outer frame can never be
/// handed to a different record.
pub struct IdAllocator {
    next: RecordId,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    /// Take the next id.
    pub fn allocate(&mut self) -> Result<RecordId> {
        let id = self.next;
        self.next = id.checked_add(1).ok_or(Error::ResourceExhausted {
            resource: "record ids",
            limit: RecordId::MAX,
        })?;
        Ok(id)
    }

    /// The id the next `allocate` will return.
    pub fn peek(&self) -> RecordId {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical owner of every live record, keyed by id.
pub struct RecordStore {
    records: FastMap<RecordId, Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore {
            records: fast_map(),
        }
    }

    /// Insert a record under its own id. Returns the record it displaced.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.id(), record)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.records.get_mut(&id)
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        self.records.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All live records, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.values()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
