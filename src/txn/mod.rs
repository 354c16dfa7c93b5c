pub mod undo;

pub use undo::{UndoEntry, UndoKind};

/// One transaction's undo log, oldest entry first.
#[derive(Debug, Default)]
pub struct Frame {
    entries: Vec<UndoEntry>,
}

impl Frame {
    pub fn new() -> Self {
        Frame {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were logged.
    pub fn entries(&self) -> &[UndoEntry] {
        &self.entries
    }

    /// Consume the frame, yielding the most recent mutation first.
    /// This is the order rollback must apply them in.
    pub fn into_undo_order(self) -> impl Iterator<Item = UndoEntry> {
        self.entries.into_iter().rev()
    }
}

/// Stack of open transactions. The tail is the innermost frame.
///
/// ```text
///   BEGIN     push   [ ] -> [ f1 ]
///   BEGIN     push   [ f1 ] -> [ f1, f2 ]
///   SET ...   log    f2 gets the entry, f1 untouched
///   ROLLBACK  pop    [ f1, f2 ] -> [ f1 ]   (f2 replayed in reverse)
///   COMMIT    clear  [ f1 ] -> [ ]          (nothing replayed)
/// ```
///
/// Only depth matters. Frames carry no id; "is a transaction active" is
/// `depth() > 0`.
#[derive(Debug, Default)]
pub struct TransactionStack {
    frames: Vec<Frame>,
}

impl TransactionStack {
    pub fn new() -> Self {
        TransactionStack { frames: Vec::new() }
    }

    /// Open a nested transaction.
    pub fn begin(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Append `entry` to the innermost frame.
    /// Returns false (and drops the entry) when no transaction is open.
    pub fn record(&mut self, entry: UndoEntry) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.push(entry);
                true
            }
            None => false,
        }
    }

    /// Detach the innermost frame for replay. `None` if no transaction is open.
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Discard every frame without replay. Returns how many were open.
    pub fn clear(&mut self) -> usize {
        let depth = self.frames.len();
        self.frames.clear();
        depth
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn innermost(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Undo entries held across all open frames.
    pub fn pending_entries(&self) -> usize {
        self.frames.iter().map(Frame::len).sum()
    }
}
