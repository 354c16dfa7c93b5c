use crate::types::{Name, RecordId, Value};

/// Which mutation an undo entry reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoKind {
    /// A new name was created. Undo removes the record.
    Insert,
    /// An existing record's value changed. Undo restores the old value.
    Update,
    /// A record was removed. Undo recreates it under its original id.
    Delete,
}

/// Everything needed to reverse one mutation without consulting the store.
///
/// | kind   | old value      | new value      |
/// |--------|----------------|----------------|
/// | Insert | -              | value inserted |
/// | Update | value replaced | value written  |
/// | Delete | value removed  | -              |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEntry {
    Insert {
        id: RecordId,
        name: Name,
        value: Value,
    },
    Update {
        id: RecordId,
        name: Name,
        old_value: Value,
        new_value: Value,
    },
    Delete {
        id: RecordId,
        name: Name,
        value: Value,
    },
}

impl UndoEntry {
    pub fn kind(&self) -> UndoKind {
        match self {
            UndoEntry::Insert { .. } => UndoKind::Insert,
            UndoEntry::Update { .. } => UndoKind::Update,
            UndoEntry::Delete { .. } => UndoKind::Delete,
        }
    }

    pub fn id(&self) -> RecordId {
        match self {
            UndoEntry::Insert { id, .. }
            | UndoEntry::Update { id, .. }
            | UndoEntry::Delete { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            UndoEntry::Insert { name, .. }
            | UndoEntry::Update { name, .. }
            | UndoEntry::Delete { name, .. } => name,
        }
    }

    /// Value the record held before the mutation, if it existed.
    pub fn old_value(&self) -> Option<&str> {
        match self {
            UndoEntry::Insert { .. } => None,
            UndoEntry::Update { old_value, .. } => Some(old_value),
            UndoEntry::Delete { value, .. } => Some(value),
        }
    }

    /// Value the record held after the mutation, if it still exists.
    pub fn new_value(&self) -> Option<&str> {
        match self {
            UndoEntry::Insert { value, .. } => Some(value),
            UndoEntry::Update { new_value, .. } => Some(new_value),
            UndoEntry::Delete { .. } => None,
        }
    }
}
