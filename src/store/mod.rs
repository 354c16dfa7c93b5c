pub mod record;

use tracing::trace;

use crate::error::{Error, Result};
use crate::index::{NameIndex, ValueIndex};
use crate::txn::UndoEntry;
use crate::types::{Record, RecordId};

pub use record::{IdAllocator, RecordStore};

/// Record store plus both indexes, kept in lockstep.
///
/// Every mutation returns the [`UndoEntry`] that reverses it; the caller
/// decides whether a transaction wants it. [`Storage::undo`] applies an entry
/// directly and produces nothing, so replay is never re-logged.
///
/// Invariants, true between any two calls:
///   - `names[n] = id`  ⇒  `records[id].name == n`
///   - live record `r`  ⇒  `r.id ∈ values[r.value]` and in no other bucket
///   - no value bucket is empty
pub struct Storage {
    records: RecordStore,
    names: NameIndex,
    values: ValueIndex,
    ids: IdAllocator,
}

impl Storage {
    pub fn new() -> Self {
        Storage {
            records: RecordStore::new(),
            names: NameIndex::new(),
            values: ValueIndex::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Create `name` or overwrite its value.
    ///
    /// A new name gets a fresh id and yields an `Insert` entry; an existing
    /// one is updated in place and yields an `Update` entry, even when the
    /// value is unchanged.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(RecordId, UndoEntry)> {
        if let Some(id) = self.names.get(name) {
            let record = self.records.get_mut(id).ok_or_else(|| {
                Error::Corruption(format!("name {name:?} points at missing record {id}"))
            })?;
            let old_value = record.replace_value(value.to_owned());
            self.values.remove(&old_value, id);
            self.values.add(value, id);
            trace!(target: "txkv::store", id, name, "updated record");
            return Ok((
                id,
                UndoEntry::Update {
                    id,
                    name: name.to_owned(),
                    old_value,
                    new_value: value.to_owned(),
                },
            ));
        }

        let id = self.ids.allocate()?;
        self.records
            .insert(Record::new(id, name.to_owned(), value.to_owned()));
        self.names.insert(name.to_owned(), id);
        self.values.add(value, id);
        trace!(target: "txkv::store", id, name, "inserted record");
        Ok((
            id,
            UndoEntry::Insert {
                id,
                name: name.to_owned(),
                value: value.to_owned(),
            },
        ))
    }

    /// Current value of `name`. Pure lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        let id = self.names.get(name)?;
        self.records.get(id).map(Record::value)
    }

    /// Remove `name`. `None` when it was not live.
    pub fn delete(&mut self, name: &str) -> Option<UndoEntry> {
        let id = self.names.remove(name)?;
        let record = self.records.remove(id)?;
        self.values.remove(record.value(), id);
        trace!(target: "txkv::store", id, name, "deleted record");
        Some(UndoEntry::Delete {
            id,
            name: name.to_owned(),
            value: record.value().to_owned(),
        })
    }

    /// Live records holding exactly `value`.
    pub fn count(&self, value: &str) -> usize {
        self.values.count(value)
    }

    /// Reverse one mutation. Entries from a frame must arrive newest first.
    pub fn undo(&mut self, entry: UndoEntry) {
        trace!(target: "txkv::store", id = entry.id(), kind = ?entry.kind(), "undo");
        match entry {
            UndoEntry::Insert { id, name, value } => {
                self.records.remove(id);
                self.names.remove(&name);
                self.values.remove(&value, id);
            }
            UndoEntry::Update {
                id,
                old_value,
                new_value,
                ..
            } => {
                if let Some(record) = self.records.get_mut(id) {
                    record.replace_value(old_value.clone());
                }
                self.values.remove(&new_value, id);
                self.values.add(&old_value, id);
            }
            UndoEntry::Delete { id, name, value } => {
                self.values.add(&value, id);
                self.names.insert(name.clone(), id);
                self.records.insert(Record::new(id, name, value));
            }
        }
    }

    pub fn id_of(&self, name: &str) -> Option<RecordId> {
        self.names.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn distinct_values(&self) -> usize {
        self.values.distinct_values()
    }

    pub fn next_id(&self) -> RecordId {
        self.ids.peek()
    }

    /// Every live record, ordered by id.
    pub fn snapshot(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self.records.iter().cloned().collect();
        records.sort_by_key(Record::id);
        records
    }

    /// Cross-check the store against both indexes.
    pub fn verify(&self) -> Result<()> {
        for (name, id) in self.names.iter() {
            let record = self.records.get(id).ok_or_else(|| {
                Error::Corruption(format!("name {name:?} points at missing record {id}"))
            })?;
            if record.name() != name {
                return Err(Error::Corruption(format!(
                    "name {name:?} points at record {id} named {:?}",
                    record.name()
                )));
            }
        }

        for record in self.records.iter() {
            if self.names.get(record.name()) != Some(record.id()) {
                return Err(Error::Corruption(format!(
                    "record {} ({:?}) is not name-indexed",
                    record.id(),
                    record.name()
                )));
            }
            if !self.values.contains(record.value(), record.id()) {
                return Err(Error::Corruption(format!(
                    "record {} missing from value bucket {:?}",
                    record.id(),
                    record.value()
                )));
            }
        }

        for (value, bucket) in self.values.iter() {
            if bucket.is_empty() {
                return Err(Error::Corruption(format!("empty value bucket {value:?}")));
            }
            for &id in bucket {
                match self.records.get(id) {
                    Some(record) if record.value() == value => {}
                    Some(record) => {
                        return Err(Error::Corruption(format!(
                            "record {id} filed under {value:?} but holds {:?}",
                            record.value()
                        )));
                    }
                    None => {
                        return Err(Error::Corruption(format!(
                            "dead record {id} filed under {value:?}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
