pub mod skiplist;

use skiplist::{SkipList, SkipListIterator};

use crate::error::{Error, Result};

/// In-memory sorted buffer of rows. Wraps a SkipList.
///
/// Deletes are handled via tombstones — an empty value that means
/// "this key is deleted." Iteration still sees tombstones; callers skip them.
pub struct MemTable {
    data: SkipList,
}

impl MemTable {
    /// Create a new empty memtable.
    pub fn new() -> Self {
        MemTable {
            data: SkipList::new(),
        }
    }

    /// Insert or update a key-value pair. Empty values are reserved for
    /// tombstones and rejected; use [`delete`](Self::delete).
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        if value.is_empty() {
            return Err(Error::InvalidInput("empty value; use delete".into()));
        }
        self.data.insert(key, value);
        Ok(())
    }

    /// Look up a key. Returns None if not found OR if tombstoned.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        match self.data.get(key) {
            Some(v) if v.is_empty() => None, // tombstone
            Some(v) => Some(v),
            None => None,
        }
    }

    /// Mark a key as deleted by writing a tombstone (empty value).
    pub fn delete(&mut self, key: Vec<u8>) {
        self.data.insert(key, Vec::new());
    }

    /// Return a sorted iterator over all entries (including tombstones).
    pub fn iter(&self) -> SkipListIterator<'_> {
        self.data.iter()
    }

    /// Current memory usage in bytes.
    pub fn size(&self) -> usize {
        self.data.size_bytes()
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}
