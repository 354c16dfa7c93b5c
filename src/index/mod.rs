pub mod name;
pub mod value;

use std::collections::{HashMap, HashSet};

use xxhash_rust::xxh3::Xxh3Builder;

pub use name::NameIndex;
pub use value::ValueIndex;

/// Hash map hashed with xxh3 instead of the default SipHash.
pub type FastMap<K, V> = HashMap<K, V, Xxh3Builder>;

/// Hash set counterpart of [`FastMap`].
pub type FastSet<T> = HashSet<T, Xxh3Builder>;

pub(crate) fn fast_map<K, V>() -> FastMap<K, V> {
    HashMap::with_hasher(Xxh3Builder::new())
}

pub(crate) fn fast_set<T>() -> FastSet<T> {
    HashSet::with_hasher(Xxh3Builder::new())
}
