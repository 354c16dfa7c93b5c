use crate::index::{FastMap, FastSet, fast_map, fast_set};
use crate::types::{RecordId, Value};

/// Maps a value to the set of live record ids currently holding it.
///
/// Buckets are sets, so adding an id twice is harmless and removal never
/// leaves a duplicate behind. A bucket that drains is dropped immediately:
/// an absent key and a count of zero are the same thing.
///
/// ```text
///   "foo" ──► { 1, 4 }
///   "bar" ──► { 2 }
///   "baz"     (absent, count 0)
/// ```
pub struct ValueIndex {
    buckets: FastMap<Value, FastSet<RecordId>>,
}

impl ValueIndex {
    pub fn new() -> Self {
        ValueIndex { buckets: fast_map() }
    }

    /// File `id` under `value`, creating the bucket on first use.
    pub fn add(&mut self, value: &str, id: RecordId) {
        match self.buckets.get_mut(value) {
            Some(bucket) => {
                bucket.insert(id);
            }
            None => {
                let mut bucket = fast_set();
                bucket.insert(id);
                self.buckets.insert(value.to_owned(), bucket);
            }
        }
    }

    /// Unfile `id` from `value`. Returns false if it was not filed there.
    pub fn remove(&mut self, value: &str, id: RecordId) -> bool {
        let Some(bucket) = self.buckets.get_mut(value) else {
            return false;
        };
        let removed = bucket.remove(&id);
        if bucket.is_empty() {
            self.buckets.remove(value);
        }
        removed
    }

    /// Number of live records holding `value`. O(1).
    pub fn count(&self, value: &str) -> usize {
        self.buckets.get(value).map_or(0, |bucket| bucket.len())
    }

    pub fn contains(&self, value: &str, id: RecordId) -> bool {
        self.buckets
            .get(value)
            .is_some_and(|bucket| bucket.contains(&id))
    }

    /// Number of distinct values with at least one live record.
    pub fn distinct_values(&self) -> usize {
        self.buckets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FastSet<RecordId>)> + '_ {
        self.buckets
            .iter()
            .map(|(value, bucket)| (value.as_str(), bucket))
    }
}

impl Default for ValueIndex {
    fn default() -> Self {
        Self::new()
    }
}
