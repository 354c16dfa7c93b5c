//! # txkv
//!
//! An in-memory key-value store with nested transactions.
//!
//! Names map to untyped string values. Besides `set`/`get`/`delete` the
//! store answers "how many names currently hold this value?" in O(1).
//!
//! ## Core idea
//! Writes are applied to the live state immediately. While a transaction is
//! open, every write also pushes an undo entry onto the innermost frame of
//! a transaction stack:
//!
//! ```text
//!   ROLLBACK  pop the innermost frame, replay its entries newest-first
//!   COMMIT    drop every frame, nothing replayed
//! ```
//!
//! Reads never look at the log, so they cost the same inside or outside a
//! transaction.
//!
//! ```
//! use txkv::DB;
//!
//! let mut db = DB::new();
//! db.set("a", "foo").unwrap();
//! db.begin().unwrap();
//! db.set("a", "bar").unwrap();
//! assert_eq!(db.count("bar"), 1);
//! db.rollback().unwrap();
//! assert_eq!(db.get("a"), Some("foo"));
//! ```

pub mod command;
pub mod db;
pub mod error;
pub mod index;
pub mod store;
pub mod txn;
pub mod types;

// Public re-exports for the top-level API
pub use db::{DB, Options, Stats};
pub use error::{Error, Result};
pub use types::{Record, RecordId};
