use crate::index::{FastMap, fast_map};
use crate::types::{Name, RecordId};

/// Maps a name to the id of its live record.
///
/// Holds only live records: a deleted name is removed outright, so
/// "one live record per name" is just map-key uniqueness.
pub struct NameIndex {
    ids: FastMap<Name, RecordId>,
}

impl NameIndex {
    pub fn new() -> Self {
        NameIndex { ids: fast_map() }
    }

    /// Id of the live record called `name`, if any.
    pub fn get(&self, name: &str) -> Option<RecordId> {
        self.ids.get(name).copied()
    }

    /// Register `name -> id`. Returns the id it replaced, if any.
    pub fn insert(&mut self, name: Name, id: RecordId) -> Option<RecordId> {
        self.ids.insert(name, id)
    }

    pub fn remove(&mut self, name: &str) -> Option<RecordId> {
        self.ids.remove(name)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RecordId)> + '_ {
        self.ids.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

impl Default for NameIndex {
    fn default() -> Self {
        Self::new()
    }
}
