/// Internal record identifier. Allocated increment-only, never reused.
pub type RecordId = u64;

/// Record name, unique among live records.
pub type Name = String;

/// Untyped record value.
pub type Value = String;

/// A live `(name, value)` pair owned by the record store.
///
/// `id` and `name` are fixed for the life of the record; only the value
/// changes in place. A record recreated by rollback gets its original id back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    name: Name,
    value: Value,
}

impl Record {
    pub fn new(id: RecordId, name: Name, value: Value) -> Self {
        Record { id, name, value }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Overwrite the value, returning the previous one.
    pub(crate) fn replace_value(&mut self, value: Value) -> Value {
        std::mem::replace(&mut self.value, value)
    }
}
